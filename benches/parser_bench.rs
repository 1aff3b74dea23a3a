//! Parser Benchmark
//!
//! Measures parse throughput (bytes/sec) on fixed snippets and on synthetic
//! module sources of increasing size.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use esz::{ParseOptions, parse, to_estree_json};

// =============================================================================
// Test Sources
// =============================================================================

const SIMPLE_SOURCE: &str = r#"
function add(a, b) {
    return a + b;
}

const result = add(1, 2);
console.log(result);
"#;

const MEDIUM_SOURCE: &str = r#"
class UserService {
    #users = [];

    addUser(user) {
        this.#users.push(user);
    }

    getUser(id) {
        return this.#users.find(u => u.id === id);
    }

    async load(url) {
        const response = await fetch(url);
        const { users = [], ...meta } = await response.json();
        for (const user of users) {
            this.addUser({ ...user, loadedAt: Date.now() });
        }
        return meta?.page ?? 0;
    }
}

export default new UserService();
"#;

/// Generate a synthetic module with `class_count` classes and helpers.
fn generate_module(class_count: usize) -> String {
    let mut source = String::with_capacity(class_count * 600);
    source.push_str("// Generated module for benchmarking\n\n");
    source.push_str("import { register } from \"./registry.js\";\n\n");

    for i in 0..class_count {
        source.push_str(&format!(
            r#"
export class Component{i} {{
    constructor(name, items = []) {{
        this.id = {i};
        this.name = name;
        this.items = [...items];
    }}

    get label() {{
        return `${{this.name}}#${{this.id}}`;
    }}

    addItem(item) {{
        if (!item || typeof item !== "object") {{
            throw new TypeError("bad item " + item);
        }}
        this.items.push(item);
        return this;
    }}

    *entries() {{
        for (let index = 0; index < this.items.length; index++) {{
            yield [index, this.items[index]];
        }}
    }}

    static create(name) {{
        return new Component{i}(name, [{{ kind: "seed", value: 0x{i:x} }}]);
    }}
}}

register("component-{i}", (options = {{}}) => Component{i}.create(options.name ?? "c{i}"));
"#
        ));
    }

    source
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_snippets(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_snippet");

    for (name, source, options) in [
        ("simple", SIMPLE_SOURCE, ParseOptions::script()),
        ("medium", MEDIUM_SOURCE, ParseOptions::module().with_next(true)),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &source, |b, source| {
            b.iter(|| black_box(parse(black_box(source), &options)))
        });
    }

    group.finish();
}

fn bench_synthetic_modules(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_module");
    group.sample_size(20);

    for class_count in [10, 100, 500] {
        let source = generate_module(class_count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(class_count),
            &source,
            |b, source| b.iter(|| black_box(parse(black_box(source), &ParseOptions::module()))),
        );
    }

    group.finish();
}

fn bench_positions_and_json(c: &mut Criterion) {
    let source = generate_module(100);
    let full = ParseOptions::module()
        .with_ranges(true)
        .with_loc(true)
        .with_raw(true)
        .with_directives(true);

    let mut group = c.benchmark_group("parse_options");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.sample_size(20);

    group.bench_function("positions", |b| {
        b.iter(|| black_box(parse(black_box(&source), &full)))
    });

    group.bench_function("positions_to_json", |b| {
        b.iter(|| {
            let program = parse(black_box(&source), &full);
            black_box(program.as_ref().map(to_estree_json).ok())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_snippets,
    bench_synthetic_modules,
    bench_positions_and_json
);
criterion_main!(benches);
