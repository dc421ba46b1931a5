use std::{alloc::{GlobalAlloc, Layout}, cell::Cell, ptr::{self, NonNull}, thread};

use poolalloc::{
    AllocError, DynamicPoolAllocator, HeapAllocator, MAX_ALIGNMENT, PoolConfiguration, PowerOf2, SystemPlatform,
};

static HEAP: HeapAllocator = HeapAllocator::new(SystemPlatform::new());

//
//  Heap Allocator
//

#[test]
fn heap_alignment() {
    for alignment in alignments() {
        for size in [0, 1, 7, 64, 1000].iter() {
            let pointer = HEAP.allocate(*size, alignment).expect("Allocated");

            assert_eq!(0, pointer.as_ptr() as usize % alignment.value(), "{} - {}", size, alignment);

            //  Safety:
            //  -   `pointer` points to `size` writable bytes.
            unsafe { ptr::write_bytes(pointer.as_ptr(), 0xab, *size) };

            unsafe { HEAP.deallocate(pointer) };
        }
    }
}

#[test]
fn heap_unit_alignment() {
    let pointer = HEAP.allocate_unaligned(16).expect("Allocated");

    //  An alignment of 1 always skips exactly 1 byte, for the bookkeeping.
    assert_eq!(1, unsafe { *pointer.as_ptr().sub(1) });

    unsafe { HEAP.deallocate(pointer) };
}

#[test]
fn heap_rejects_large_alignment() {
    let too_large = PowerOf2::new(MAX_ALIGNMENT.value() * 2).unwrap();

    assert_eq!(Err(AllocError::AlignmentTooLarge { alignment: 256 }), HEAP.allocate(8, too_large));
}

#[test]
fn heap_rejects_overflow() {
    let eight = PowerOf2::new(8).unwrap();

    assert_eq!(Err(AllocError::SizeOverflow { size: usize::MAX, alignment: 8 }), HEAP.allocate(usize::MAX, eight));
}

#[test]
fn heap_construct_destruct() {
    let raw = HEAP.allocate(std::mem::size_of::<Tracked>(), PowerOf2::align_of::<Tracked>()).unwrap();

    let drops = Cell::new(0);

    let tracked = unsafe { HEAP.construct(raw, Tracked::new("heap", &drops)) };

    assert_eq!("heap", unsafe { tracked.as_ref().name.as_str() });

    let raw = unsafe { HEAP.destruct(tracked) };

    assert_eq!(1, drops.get());

    unsafe { HEAP.deallocate(raw) };
}

#[test]
fn heap_global_alloc() {
    let layout = Layout::from_size_align(100, 32).unwrap();

    let pointer = unsafe { HEAP.alloc(layout) };

    assert!(!pointer.is_null());
    assert_eq!(0, pointer as usize % 32);

    unsafe { HEAP.dealloc(pointer, layout) };
}

//
//  Dynamic Pool Allocator
//

#[test]
fn pool_scenario() {
    let pool = pool(16, 1, 8);

    let a = pool.allocate().unwrap();
    assert_eq!(0, a.as_ptr() as usize % 8);

    unsafe { pool.deallocate(a) };

    assert_eq!(a, pool.allocate().unwrap());

    let b = pool.allocate().unwrap();
    assert_ne!(a, b);
    assert_eq!(0, b.as_ptr() as usize % 8);

    assert_eq!(2, pool.owned_count());
    assert_eq!(0, pool.free_count());

    unsafe {
        pool.deallocate(b);
        pool.deallocate(a);
    }

    assert_eq!(2, pool.free_count());
}

#[test]
fn pool_alignment() {
    for alignment in alignments() {
        let pool = pool(24, 2, alignment.value());

        let blocks: Vec<_> = (0..5).map(|_| pool.allocate().unwrap()).collect();

        for block in &blocks {
            assert_eq!(0, block.as_ptr() as usize % alignment.value(), "{}", alignment);
        }

        for block in blocks {
            unsafe { pool.deallocate(block) };
        }

        assert_eq!(5, pool.owned_count());
        assert_eq!(5, pool.free_count());
    }
}

#[test]
fn pool_growth_non_overlapping() {
    let pool = pool(48, 1, 16);

    let mut blocks: Vec<_> = (0..16).map(|_| pool.allocate().unwrap().as_ptr() as usize).collect();
    blocks.sort_unstable();

    for pair in blocks.windows(2) {
        assert!(pair[0] + 48 <= pair[1], "{:x} overlaps {:x}", pair[0], pair[1]);
    }

    assert_eq!(16, pool.owned_count());
    assert_eq!(48, pool.element_size());
}

#[test]
fn pool_recycles_blocks() {
    let pool = pool(64, 4, 8);

    let first: Vec<_> = (0..4).map(|_| pool.allocate().unwrap()).collect();

    for block in first.iter().rev() {
        unsafe { pool.deallocate(*block) };
    }

    let second: Vec<_> = (0..4).map(|_| pool.allocate().unwrap()).collect();

    assert_eq!(first, second);
    assert_eq!(4, pool.owned_count());
}

#[test]
fn pool_construct_destruct() {
    let pool = DynamicPoolAllocator::new(PoolConfiguration::of::<Tracked>().with_initial_count(2)).unwrap();

    let drops = Cell::new(0);

    let names = ["alpha", "beta", "gamma"];

    let tracked: Vec<NonNull<Tracked>> = names.iter()
        .map(|name| {
            let raw = pool.allocate().unwrap();
            unsafe { pool.construct(raw, Tracked::new(name, &drops)) }
        })
        .collect();

    for (name, tracked) in names.iter().zip(&tracked) {
        assert_eq!(*name, unsafe { tracked.as_ref().name.as_str() });
    }

    for tracked in tracked {
        unsafe { pool.deallocate(pool.destruct(tracked)) };
    }

    assert_eq!(3, drops.get());
    assert_eq!(3, pool.free_count());
}

#[test]
fn pool_construct_default() {
    let pool = DynamicPoolAllocator::new(PoolConfiguration::of::<Vec<u32>>().with_initial_count(1)).unwrap();

    let raw = pool.allocate().unwrap();

    let vec: NonNull<Vec<u32>> = unsafe { pool.construct_default(raw) };

    unsafe {
        assert!(vec.as_ref().is_empty());

        (*vec.as_ptr()).extend_from_slice(&[1, 2, 3]);
        assert_eq!(&[1, 2, 3], vec.as_ref().as_slice());

        pool.deallocate(pool.destruct(vec));
    }
}

#[test]
fn pool_invalid_configuration() {
    let empty = DynamicPoolAllocator::new(PoolConfiguration::new(8).with_initial_count(0));
    assert_eq!(Some(AllocError::EmptyPool), empty.err());

    let too_aligned = PoolConfiguration::new(8).with_alignment(PowerOf2::new(512).unwrap());
    assert_eq!(Some(AllocError::AlignmentTooLarge { alignment: 512 }), DynamicPoolAllocator::new(too_aligned).err());
}

#[test]
fn pool_moves_across_threads() {
    let pool = pool(32, 8, 32);

    let handle = thread::spawn(move || {
        let block = pool.allocate().unwrap();
        unsafe { pool.deallocate(block) };

        pool
    });

    let pool = handle.join().expect("Joined");

    assert_eq!(8, pool.owned_count());
    assert_eq!(8, pool.free_count());
}

//
//  Helpers
//

fn alignments() -> impl Iterator<Item = PowerOf2> {
    (0..8).map(|shift| PowerOf2::new(1 << shift).unwrap())
}

fn pool(element_size: usize, initial_count: usize, alignment: usize) -> DynamicPoolAllocator {
    let configuration = PoolConfiguration::new(element_size)
        .with_initial_count(initial_count)
        .with_alignment(PowerOf2::new(alignment).unwrap());

    DynamicPoolAllocator::new(configuration).expect("Pool")
}

struct Tracked<'a> {
    name: String,
    drops: &'a Cell<usize>,
}

impl<'a> Tracked<'a> {
    fn new(name: &str, drops: &'a Cell<usize>) -> Self { Self { name: name.to_string(), drops } }
}

impl<'a> Drop for Tracked<'a> {
    fn drop(&mut self) { self.drops.set(self.drops.get() + 1); }
}
