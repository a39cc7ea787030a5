use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use carlist::*;

const MAKES: [&str; 6] = ["Ford", "Tesla", "Kia", "Vauxhall", "BMW", "Toyota"];
const FUELS: [&str; 4] = ["Petrol", "Diesel", "Electric", "Hybrid"];

fn listings_csv(rows: usize) -> String {
    let mut csv = String::from("Make,Model,Fuel,Year,Price\n");
    for i in 0..rows {
        csv.push_str(&format!(
            "{},Model {},{},{},{}\n",
            MAKES[i % MAKES.len()],
            i,
            FUELS[i % FUELS.len()],
            2010 + (i % 14),
            5000 + (i * 37) % 60000
        ));
    }
    csv
}

fn bench_from_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_from_csv");

    for size in [100, 1000, 10000].iter() {
        let csv = listings_csv(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &csv, |b, csv| {
            b.iter(|| Table::from_csv("bench", black_box(csv)).unwrap());
        });
    }
    group.finish();
}

fn bench_price_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_range_filter");

    for size in [100, 1000, 10000].iter() {
        let mut table = Table::from_csv("bench", &listings_csv(*size)).unwrap();
        normalize_price_column(&mut table);
        let request: FilterRequest = [("min_price", "15000"), ("max_price", "40000")]
            .into_iter()
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| {
                let mut view = FilterView::new(table);
                apply_filters(&mut view, black_box(&request));
                view.len()
            });
        });
    }
    group.finish();
}

fn bench_all_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_filters");

    for size in [100, 1000, 10000].iter() {
        let mut table = Table::from_csv("bench", &listings_csv(*size)).unwrap();
        normalize_price_column(&mut table);
        let request: FilterRequest = [
            ("min_price", "10000"),
            ("Make", "o"),
            ("Fuel", "petrol"),
            ("Year", "201"),
        ]
        .into_iter()
        .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| {
                let mut view = FilterView::new(table);
                let applied = apply_filters(&mut view, black_box(&request));
                (view.head(ROW_LIMIT).len(), applied.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_from_csv, bench_price_range, bench_all_filters);
criterion_main!(benches);
