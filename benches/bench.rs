use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scopemux::Scope;

fn benchmark(c: &mut Criterion) {
    c.bench_function("build 10x10 scope tree", |b| {
        b.iter(|| {
            let mut root: Scope<&'static str> = Scope::new();
            root.prefix("api");
            root.use_fn(|h| h);
            for i in 0..10 {
                let mut child = root.subrouter();
                child.prefix(&format!("scope{i}"));
                for j in 0..10 {
                    child.handle(&format!("GET /route{j}"), "handler").unwrap();
                }
            }
            black_box(root.build().unwrap())
        })
    });

    c.bench_function("path join", |b| {
        b.iter(|| scopemux::path::join(black_box("/v1//v2/{id}"), black_box("//foobar/baz")))
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
