// benches/grade_histogram.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use course_scrape::grades::{normalize, GradeSheet};
use course_scrape::specs::grades::parse_histogram;

const URL: &str = "https://karakterer.dtu.dk/Histogram/1/01005/Winter-2018";

fn sample() -> String {
    let rows = [
        ("12", 41), ("10", 63), ("7", 88), ("4", 52), ("02", 30), ("00", 17), ("-3", 6),
        ("Ej mødt", 12), ("Syg", 3),
    ];
    let mut table = String::from("<table><tr><th>Karakter</th><th>Antal</th><th>Fordeling</th></tr>");
    for (grade, n) in rows {
        table.push_str(&format!("<tr><td>{grade}</td><td>{n}</td><td><div style=\"width:{n}px\"></div></td></tr>"));
    }
    table.push_str("</table>");
    format!(
        "<html><head><title>Karakterer</title></head><body>\
         <table><tr><td>Kursus</td><td>01005 Matematik 1</td></tr></table>\
         <table><tr><td>Eksamensperiode</td><td>Vinter 2018</td></tr></table>\
         {table}</body></html>"
    )
}

fn bench_histogram(c: &mut Criterion) {
    let doc = sample();

    c.bench_function("grade_histogram_parse", |b| {
        b.iter(|| {
            let rec = parse_histogram(URL, black_box(&doc)).unwrap_or_default();
            black_box(rec.len())
        })
    });

    c.bench_function("grade_histogram_average", |b| {
        b.iter(|| {
            let rec = parse_histogram(URL, black_box(&doc)).unwrap_or_default();
            black_box(GradeSheet::from_record(&normalize(&rec)).weighted_average())
        })
    });
}

criterion_group!(benches, bench_histogram);
criterion_main!(benches);
