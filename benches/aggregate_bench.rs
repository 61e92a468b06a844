use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::collections::BTreeSet;

use rechnungsfilter::prelude::*;

fn build_export(customers: usize, invoices_per_customer: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Export>");
    for c in 0..customers {
        xml.push_str(&format!(
            "<Customer><No>C{c}</No><Name>Kunde {c}</Name><City>Berlin</City></Customer>"
        ));
    }
    for c in 0..customers {
        for i in 0..invoices_per_customer {
            xml.push_str(&format!(
                "<Invoice><No>R{c}-{i}</No><SellToCustomer>C{c}</SellToCustomer>\
                 <Line><Description>Fulfillment-Dienstleistung</Description><SalesPrice>1.250,00</SalesPrice></Line>\
                 <Line><Description>Versandkosten EU</Description><SalesPrice>4,90</SalesPrice></Line>\
                 <Line><Description>Verpackung</Description><SalesPrice>0,50</SalesPrice></Line>\
                 </Invoice>"
            ));
        }
    }
    xml.push_str("</Export>");
    xml
}

fn bench_parse(c: &mut Criterion) {
    let xml = build_export(100, 10);
    c.bench_function("parse_1000_invoices", |b| {
        b.iter(|| black_box(parse_document(black_box(&xml))));
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let doc = parse_document(&build_export(100, 10)).unwrap();
    let customers = parse_customers(&doc);
    c.bench_function("aggregate_1000_invoices", |b| {
        b.iter(|| black_box(aggregate_invoices(black_box(&doc), black_box(&customers))));
    });
}

fn bench_summarize(c: &mut Criterion) {
    let doc = parse_document(&build_export(100, 10)).unwrap();
    let customers = parse_customers(&doc);
    let totals = aggregate_invoices(&doc, &customers);
    let selection = Selection::new(customers.len());
    c.bench_function("summarize_100_customers", |b| {
        b.iter(|| black_box(summarize(&customers, &totals, &selection)));
    });
}

fn bench_filter_serialize(c: &mut Criterion) {
    let doc = parse_document(&build_export(100, 10)).unwrap();
    let excluded: BTreeSet<String> = (0..100).step_by(3).map(|c| format!("C{c}")).collect();
    c.bench_function("filter_and_serialize", |b| {
        b.iter(|| {
            let filtered = filter_document(black_box(&doc), &excluded);
            black_box(to_xml_string(&filtered))
        });
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_aggregate,
    bench_summarize,
    bench_filter_serialize,
);
criterion_main!(benches);
