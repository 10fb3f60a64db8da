use abp_reader::{AsyncReadSource, ReadOptions, read_bytes, read_u64};
use abp_tests::pipe;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

fn bench_read_exact(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("read_exact");

    for size in [16usize, 4096, 1 << 20] {
        let data = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                rt.block_on(async {
                    let mut source = AsyncReadSource::new(&data[..]);
                    read_bytes(&mut source, data.len()).await.unwrap()
                })
            });
        });
    }

    group.finish();
}

fn bench_decode_u64(c: &mut Criterion) {
    let rt = runtime();
    let data: Vec<u8> = (0..1000u64).flat_map(u64::to_le_bytes).collect();
    let opts = ReadOptions::default();

    c.bench_function("decode_1000_u64", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut source = AsyncReadSource::new(&data[..]);
                let mut sum = 0u64;
                for _ in 0..1000 {
                    sum = sum.wrapping_add(read_u64(&mut source, &opts).await.unwrap());
                }
                sum
            })
        });
    });
}

fn bench_pipe_chunks(c: &mut Criterion) {
    let rt = runtime();
    let data = vec![0x5Au8; 4096];

    c.bench_function("pipe_4096", |b| {
        b.iter(|| {
            rt.block_on(async {
                let (writer, mut reader) = pipe();
                writer.write(&data);
                read_bytes(&mut reader, data.len()).await.unwrap()
            })
        });
    });
}

criterion_group!(benches, bench_read_exact, bench_decode_u64, bench_pipe_chunks);
criterion_main!(benches);
