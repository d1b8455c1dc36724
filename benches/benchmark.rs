use criterion::{Criterion, criterion_group, criterion_main};
use rtt_reconcile::dates::{DateTable, merge_dates};
use rtt_reconcile::reconcile::{derive_bipartition, reconcile_root, root_to_tip};
use rtt_reconcile::{PhylogeneticTree, parse_tree};
use std::hint::black_box;

const TREE_SIZES: &[(&str, usize)] = &[("n128", 128), ("n1024", 1024), ("n2048", 2048)];

/// Balanced Newick tree over tips `t{start}..t{end}` with unit branch lengths.
fn balanced_newick(start: usize, end: usize, out: &mut String) {
    if end - start == 1 {
        out.push_str(&format!("t{start}:0.001"));
        return;
    }
    let mid = start + (end - start) / 2;
    out.push('(');
    balanced_newick(start, mid, out);
    out.push(',');
    balanced_newick(mid, end, out);
    out.push_str("):0.01");
}

/// Caterpillar Newick tree over `n` tips, the worst case for path reversal.
fn caterpillar_newick(n: usize) -> String {
    let mut newick = "(".repeat(n);
    newick.push_str("t0:0.001");
    for i in 1..n {
        newick.push_str(&format!(",t{i}:0.001):0.01"));
    }
    newick.push_str(");");
    newick
}

fn reference_tree(n: usize) -> PhylogeneticTree {
    let mut newick = String::new();
    balanced_newick(0, n, &mut newick);
    newick.push(';');
    parse_tree(newick).unwrap()
}

fn date_table(n: usize) -> DateTable {
    let mut text = String::from("strain\tdate_decimal\n");
    for i in 0..n {
        text.push_str(&format!("t{i}\t{}\n", 2020.0 + i as f64 / n as f64));
    }
    DateTable::from_tsv_str(&text, 0).unwrap()
}

fn parsing(c: &mut Criterion) {
    for &(name, n) in TREE_SIZES {
        let newick = caterpillar_newick(n);
        c.bench_function(&format!("parse_{name}"), |b| {
            b.iter(|| parse_tree(black_box(&newick)).unwrap());
        });
    }
}

fn reconciliation(c: &mut Criterion) {
    for &(name, n) in TREE_SIZES {
        let divergence = parse_tree(caterpillar_newick(n)).unwrap();
        let bipartition = derive_bipartition(&reference_tree(n)).unwrap();
        let table = date_table(n);

        c.bench_function(&format!("reconcile_{name}"), |b| {
            b.iter(|| {
                let (rerooted, _) = reconcile_root(divergence.clone(), &bipartition).unwrap();
                let records = root_to_tip(&rerooted).unwrap();
                merge_dates(records, &table, None, None).unwrap()
            });
        });
    }
}

criterion_group!(regression, parsing);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = reconciliation
}
criterion_main!(regression, reporting);
