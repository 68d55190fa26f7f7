//! Performance benchmarks for pdf-toolbox
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pdf_toolbox::pdf::{PdfMutate, QpdfMutate};

/// Minimal xref-correct PDF with `page_count` pages, one text line each.
fn minimal_pdf(page_count: u32) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        page_count
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for i in 0..page_count {
        let content = format!("BT /F1 24 Tf 72 720 Td (Page {}) Tj ET", i + 1);
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (idx, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", idx + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}

/// Benchmark merging a growing number of documents
fn bench_merge(c: &mut Criterion) {
    let doc = minimal_pdf(10);

    let mut group = c.benchmark_group("merge");
    group.throughput(Throughput::Bytes(doc.len() as u64));

    for count in [2, 8, 32] {
        let inputs: Vec<&[u8]> = (0..count).map(|_| doc.as_slice()).collect();
        let mutate = QpdfMutate::new();

        group.bench_with_input(
            BenchmarkId::new("merge_in_order", format!("{}_docs", count)),
            &inputs,
            |b, inputs| {
                b.iter(|| {
                    let merged = mutate.merge_in_order(black_box(inputs)).unwrap();
                    black_box(merged);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark page extraction from a larger document
fn bench_extract_pages(c: &mut Criterion) {
    let doc = minimal_pdf(100);
    let mutate = QpdfMutate::new();

    let mut group = c.benchmark_group("extract_pages");
    group.throughput(Throughput::Bytes(doc.len() as u64));

    group.bench_function("single_page", |b| {
        b.iter(|| {
            let output = mutate.extract_pages(black_box(&doc), &[50]).unwrap();
            black_box(output);
        });
    });

    let every_other: Vec<u32> = (1..=100).filter(|p| p % 2 == 1).collect();
    group.bench_function("every_other_page", |b| {
        b.iter(|| {
            let output = mutate
                .extract_pages(black_box(&doc), black_box(&every_other))
                .unwrap();
            black_box(output);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_merge, bench_extract_pages);
criterion_main!(benches);
