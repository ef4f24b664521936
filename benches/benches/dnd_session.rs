// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_dnd::coordinator::Coordinator;
use understory_dnd::delegate::{AbsorberDelegate, DonorDelegate};
use understory_dnd::hierarchy::Hierarchy;
use understory_view_tree::{LocalNode, NodeId, Tree};

struct Accept;

impl DonorDelegate<NodeId, ()> for Accept {}
impl AbsorberDelegate<NodeId, ()> for Accept {}

/// Two side-by-side columns, each a chain of `depth` nested nodes ending in a
/// leaf. The donor sits at the top of the left chain, the absorber at the top
/// of the right one, and `width` draggable siblings share the left leaf's parent.
struct Scene {
    tree: Tree,
    dnd: Coordinator<NodeId>,
    card: NodeId,
    _delegate: Rc<Accept>,
}

fn chain(tree: &mut Tree, parent: NodeId, depth: usize) -> NodeId {
    let mut cur = parent;
    for _ in 0..depth {
        cur = tree.insert(Some(cur), LocalNode::with_frame(Rect::new(0.0, 0.0, 100.0, 1000.0)));
    }
    cur
}

fn scene(depth: usize, width: usize) -> Scene {
    let mut tree = Tree::new();
    let root = tree.insert(None, LocalNode::with_frame(Rect::new(0.0, 0.0, 200.0, 1000.0)));
    let left = tree.insert(Some(root), LocalNode::with_frame(Rect::new(0.0, 0.0, 100.0, 1000.0)));
    let right = tree.insert(Some(root), LocalNode::with_frame(Rect::new(100.0, 0.0, 200.0, 1000.0)));
    let left_leaf = chain(&mut tree, left, depth);
    chain(&mut tree, right, depth);

    let delegate = Rc::new(Accept);
    let mut dnd: Coordinator<NodeId> = Coordinator::new();
    let reg = dnd.registry_mut();
    let mut card = left_leaf;
    for i in 0..width {
        let y = i as f64 * 10.0;
        card = tree.insert(Some(left_leaf), LocalNode::with_frame(Rect::new(0.0, y, 50.0, y + 10.0)));
        reg.register_draggable(card);
    }
    reg.register_donor(left, Rc::downgrade(&delegate)).unwrap();
    reg.register_absorber(right, Rc::downgrade(&delegate)).unwrap();
    Scene {
        tree,
        dnd,
        card,
        _delegate: delegate,
    }
}

fn bench_resolve_donor(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_donor");
    for &depth in &[4_usize, 16, 64, 256] {
        let s = scene(depth, 1);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(s.dnd.registry().resolve_donor(&s.tree, black_box(s.card))));
        });
    }
    group.finish();
}

fn bench_resolve_absorber(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_absorber");
    for &depth in &[4_usize, 16, 64, 256] {
        let s = scene(depth, 1);
        let pt = Point::new(150.0, 500.0);
        assert!(s.dnd.resolve_absorber(&s.tree, pt).is_some());
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(s.dnd.resolve_absorber(&s.tree, black_box(pt))));
        });
    }
    group.finish();
}

fn bench_session_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("pickup_release_reclaim");
    for &width in &[1_usize, 64, 1024] {
        let mut s = scene(8, width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                let began = s.dnd.pickup(&mut s.tree, s.card, Point::new(10.0, 5.0));
                debug_assert!(began.began());
                // Drop back over the donor: no absorber, reclaimed into place.
                black_box(s.dnd.release(&mut s.tree, Point::new(50.0, 500.0)))
            });
        });
        assert_eq!(s.tree.parent_of(s.card).map(|p| s.tree.children(p).len()), Some(width));
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_donor,
    bench_resolve_absorber,
    bench_session_cycle
);
criterion_main!(benches);
