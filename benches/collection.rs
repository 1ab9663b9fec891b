// benches/collection.rs
use criterion::{ criterion_group, criterion_main, Criterion, black_box };

use bbti_collect::{
    collection::{ serialize, CollectionSpec, Fragment, IdPattern },
    facets::{ FacetDependencyFilter, FacetForm, FacetTable },
};

fn sample_ids(n: usize) -> String {
    (0..n).map(|i| (1000 + i * 7).to_string()).collect::<Vec<_>>().join(", ")
}

fn sample_table(cities: usize, counties: usize) -> FacetTable {
    let mut t = FacetTable::default();
    for i in 0..cities {
        t.insert(&format!("City {i}"), &format!("County {}", i % counties));
    }
    t
}

fn bench_collection(c: &mut Criterion) {
    let raw = sample_ids(500);
    let url = serialize("Benchmark collection", &raw, "http://bbti.example/create_collection.html");
    let ids = IdPattern::default();

    c.bench_function("serialize_500", |b| {
        b.iter(|| serialize(black_box("Benchmark collection"), black_box(&raw), "create_collection.html"))
    });

    c.bench_function("parse_500", |b| {
        b.iter(|| {
            let spec = CollectionSpec::parse(black_box(&url), &ids);
            black_box(spec.map(|s| s.len()).unwrap_or(0))
        })
    });

    let page = format!(
        "<html><body><header><div><div>nav</div></div></header><main><div class=\"org\">{}</div></main></body></html>",
        "<div><p>detail</p></div>".repeat(200)
    );
    c.bench_function("extract_fragment", |b| {
        b.iter(|| black_box(Fragment::extract("1", black_box(&page)).is_found()))
    });
}

fn bench_facets(c: &mut Criterion) {
    let table = sample_table(2000, 40);
    let mut form = FacetForm::from_table(&table);
    form.set_checked("County 3", true);
    form.set_checked("County 17", true);
    let filter = FacetDependencyFilter::with_table(table);

    c.bench_function("align_2000_cities", |b| {
        b.iter(|| black_box(filter.on_county_change(&mut form, None).shown))
    });
}

criterion_group!(benches, bench_collection, bench_facets);
criterion_main!(benches);
