use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stridevec::StrideVec;

fn bench_sequential_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_push");

    for size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("owned_growing", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = StrideVec::new(8, 1).unwrap();

                for i in 0..size as u64 {
                    vec.push(&i.to_le_bytes()).unwrap();
                }

                black_box(vec.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("borrowed", size), size, |b, &size| {
            b.iter(|| {
                let mut buffer = vec![0u8; size * 8];
                let mut vec = StrideVec::with_buffer(8, &mut buffer).unwrap();

                for i in 0..size as u64 {
                    vec.push(&i.to_le_bytes()).unwrap();
                }

                black_box(vec.len())
            });
        });
    }
    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("get_operations", size), size, |b, &size| {
            let mut vec = StrideVec::new(8, size).unwrap();

            // Pre-populate the vector
            for i in 0..size as u64 {
                vec.push(&i.to_le_bytes()).unwrap();
            }

            b.iter(|| {
                for i in 0..size {
                    black_box(vec.get((i * 7) % size).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_iterator_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterator");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("full_iteration", size), size, |b, &size| {
            let mut vec = StrideVec::new(8, size).unwrap();

            for i in 0..size as u64 {
                vec.push(&i.to_le_bytes()).unwrap();
            }

            b.iter(|| {
                for element in black_box(&vec) {
                    black_box(element);
                }
            });
        });
    }
    group.finish();
}

fn bench_insert_delete_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("shifting");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("insert_front", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = StrideVec::new(8, 1).unwrap();

                for i in 0..size as u64 {
                    vec.insert(0, &i.to_le_bytes()).unwrap();
                }

                // Drain from the front, exercising shrink on the way down
                while !vec.is_empty() {
                    vec.delete(0).unwrap();
                }

                black_box(vec.capacity())
            });
        });
    }
    group.finish();
}

fn bench_binary_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary_search");

    for size in [1000, 10000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("sorted_u64", size), size, |b, &size| {
            let mut vec = StrideVec::new(8, size).unwrap();

            for i in 0..size as u64 {
                vec.push(&(i * 2).to_be_bytes()).unwrap();
            }

            b.iter(|| {
                for i in 0..size as u64 {
                    let key = (i * 3).to_be_bytes();
                    black_box(vec.binary_search(&key, |stored, key| stored.cmp(key)).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_large_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_elements");

    for element_size in [1024, 4096].iter() {
        group.throughput(Throughput::Bytes(*element_size as u64 * 10));
        group.bench_with_input(
            BenchmarkId::new("push_large", element_size),
            element_size,
            |b, &element_size| {
                let large_data = vec![b'x'; element_size];

                b.iter(|| {
                    let mut vec = StrideVec::new(element_size, 1).unwrap();

                    for _ in 0..10 {
                        vec.push(&large_data).unwrap();
                    }

                    black_box(vec.len())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_push,
    bench_random_access,
    bench_iterator_performance,
    bench_insert_delete_front,
    bench_binary_search,
    bench_large_elements
);
criterion_main!(benches);
