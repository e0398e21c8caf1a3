use std::sync::atomic::{AtomicUsize, Ordering};

use bkflow::alloc::{BlockArena, BlockPool, DEFAULT_BLOCK_SIZE};
use bkflow::{AllocError, Graph, GraphConfig};

static OOM_REPORTS: AtomicUsize = AtomicUsize::new(0);

fn count_oom(message: &str) {
    assert!(message.starts_with("Not enough memory!"));
    OOM_REPORTS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn test_arena_pairs_never_straddle_blocks() {
    let mut arena = BlockArena::<(u32, u32)>::new(7, None);
    for n in 0..20u32 {
        let i = arena.allocate(2).unwrap();
        // Both halves of the pair live in the same block.
        assert_eq!(i / 7, (i + 1) / 7);
        arena[i] = (n, 0);
        arena[i + 1] = (n, 1);
    }
    assert_eq!(arena.len(), 40);
    // Three pairs per block of seven.
    assert_eq!(arena.block_count(), 7);
    assert_eq!(arena.iter().filter(|(_, rec)| rec.1 == 1).count(), 20);
}

#[test]
fn test_arena_default_block_size() {
    let mut arena = BlockArena::<u8>::new(DEFAULT_BLOCK_SIZE, None);
    let first = arena.allocate(DEFAULT_BLOCK_SIZE).unwrap();
    assert_eq!(first, 0);
    assert_eq!(arena.allocate(1).unwrap(), DEFAULT_BLOCK_SIZE);
    assert_eq!(arena.block_count(), 2);
}

#[test]
fn test_exhausted_arena_reports_to_handler() {
    // A block this large can never be reserved; the request fails without
    // touching the heap.
    let mut arena = BlockArena::<u64>::new(usize::MAX / 2, Some(count_oom));
    let before = OOM_REPORTS.load(Ordering::SeqCst);

    let err = arena.allocate(1).unwrap_err();
    assert_eq!(
        err,
        AllocError::OutOfMemory { records: usize::MAX / 2, record_size: 8 }
    );
    assert!(err.to_string().contains("records of 8 bytes"));
    assert_eq!(OOM_REPORTS.load(Ordering::SeqCst), before + 1);
    assert!(arena.is_empty());
    assert_eq!(arena.block_count(), 0);
}

#[test]
fn test_pool_free_list_is_lifo() {
    let mut pool = BlockPool::new(4, None);
    let ids: Vec<usize> = (0..6).map(|v| pool.alloc(v).unwrap()).collect();
    assert_eq!(pool.len(), 6);

    assert_eq!(pool.release(ids[1]), Some(1));
    assert_eq!(pool.release(ids[4]), Some(4));
    assert_eq!(pool.release(ids[4]), None);
    assert_eq!(pool.len(), 4);

    // Most recently released slot first.
    assert_eq!(pool.alloc(40).unwrap(), ids[4]);
    assert_eq!(pool.alloc(10).unwrap(), ids[1]);
    assert_eq!(pool.capacity(), 6);
    assert_eq!(pool.get(ids[1]), Some(&10));

    *pool.get_mut(ids[0]).unwrap() += 100;
    assert_eq!(pool.get(ids[0]), Some(&100));
}

#[test]
fn test_graph_with_tiny_blocks() -> anyhow::Result<()> {
    // Minimum block sizes stress the block boundaries of both allocators.
    let config = GraphConfig::new(64)
        .with_arc_block_size(0)
        .with_orphan_block_size(0);
    let mut g: Graph<i32> = Graph::with_config(config);
    assert_eq!(g.config().arc_block_size, 2);
    assert_eq!(g.config().orphan_block_size, 1);

    let first = g.add_nodes(64)?;
    for i in first..first + 63 {
        g.add_edge(i, i + 1, 5, 5)?;
    }
    for i in (first..first + 64).step_by(2) {
        g.set_terminal_weights(i, 3, 0)?;
        g.set_terminal_weights(i + 1, 0, 3)?;
    }

    assert_eq!(g.maxflow()?, 96);
    assert_eq!(g.arc_count(), 126);
    assert!(g.validate_invariants());
    Ok(())
}
