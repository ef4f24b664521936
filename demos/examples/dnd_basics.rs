// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a card between two columns of a view tree.
//!
//! The first drop lands on an accepting column, the second on a column that
//! refuses the card, which then snaps back to its slot.
//!
//! Run:
//! - `cargo run -p understory_examples --example dnd_basics`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_dnd::coordinator::Coordinator;
use understory_dnd::delegate::{AbsorberDelegate, DonorDelegate};
use understory_view_tree::{LocalNode, NodeId, Tree};

/// A named column that logs what happens to it.
struct Column {
    name: &'static str,
    accepts: Cell<bool>,
    cards: RefCell<Vec<NodeId>>,
}

impl Column {
    fn new(name: &'static str, accepts: bool) -> Rc<Self> {
        Rc::new(Self {
            name,
            accepts: Cell::new(accepts),
            cards: RefCell::new(Vec::new()),
        })
    }
}

impl DonorDelegate<NodeId, String> for Column {
    fn will_begin(&self, _donor: NodeId, element: NodeId) -> Option<String> {
        Some(format!("card {element:?} from {}", self.name))
    }

    fn did_begin(&self, _donor: NodeId, element: NodeId) {
        self.cards.borrow_mut().retain(|c| *c != element);
        println!("  [{}] lifted {element:?}", self.name);
    }

    fn did_donate(&self, _donor: NodeId, element: NodeId) {
        println!("  [{}] gave away {element:?}", self.name);
    }

    fn did_reclaim(&self, _donor: NodeId, element: NodeId) {
        self.cards.borrow_mut().push(element);
        println!("  [{}] got {element:?} back", self.name);
    }
}

impl AbsorberDelegate<NodeId, String> for Column {
    fn can_absorb(&self, _absorber: NodeId, _element: NodeId, payload: Option<&String>) -> bool {
        println!(
            "  [{}] offered {:?}: {}",
            self.name,
            payload,
            if self.accepts.get() { "yes" } else { "no" }
        );
        self.accepts.get()
    }

    fn did_absorb(&self, _absorber: NodeId, element: NodeId, _payload: Option<&String>) {
        self.cards.borrow_mut().push(element);
        println!("  [{}] took {element:?}", self.name);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let mut tree = Tree::new();
    let board = tree.insert(None, LocalNode::with_frame(Rect::new(0.0, 0.0, 600.0, 400.0)));
    let todo = tree.insert(Some(board), LocalNode::with_frame(Rect::new(0.0, 0.0, 200.0, 400.0)));
    let doing = tree.insert(Some(board), LocalNode::with_frame(Rect::new(200.0, 0.0, 400.0, 400.0)));
    let done = tree.insert(Some(board), LocalNode::with_frame(Rect::new(400.0, 0.0, 600.0, 400.0)));
    let card = tree.insert(Some(todo), LocalNode::with_frame(Rect::new(10.0, 10.0, 190.0, 60.0)));

    let todo_col = Column::new("todo", true);
    let doing_col = Column::new("doing", true);
    let done_col = Column::new("done", false);
    todo_col.cards.borrow_mut().push(card);

    let mut dnd: Coordinator<NodeId, String> = Coordinator::new();
    let reg = dnd.registry_mut();
    reg.register_draggable(card);
    for (node, col) in [(todo, &todo_col), (doing, &doing_col), (done, &done_col)] {
        let weak = Rc::downgrade(col);
        reg.register_donor(node, weak.clone())
            .expect("column is alive");
        reg.register_absorber(node, weak).expect("column is alive");
    }

    println!("Drag todo → doing:");
    let outcome = dnd.pickup(&mut tree, card, Point::new(50.0, 30.0));
    println!("  pickup: {outcome:?}");
    for x in [100.0, 200.0, 260.0] {
        dnd.drag_to(Point::new(x, 40.0));
    }
    let outcome = dnd.release(&mut tree, Point::new(260.0, 40.0));
    println!("  release: {outcome:?}");
    println!(
        "  card world frame: {:?}",
        tree.world_frame(card).expect("card is alive")
    );

    println!("\nDrag doing → done (refused):");
    let outcome = dnd.pickup(&mut tree, card, Point::new(260.0, 40.0));
    println!("  pickup: {outcome:?}");
    let outcome = dnd.release(&mut tree, Point::new(500.0, 200.0));
    println!("  release: {outcome:?}");
    println!(
        "  card parent: {:?} (doing = {doing:?}), world frame: {:?}",
        tree.parent(card),
        tree.world_frame(card).expect("card is alive")
    );

    println!("\nCards per column:");
    for col in [&todo_col, &doing_col, &done_col] {
        println!("  {}: {:?}", col.name, col.cards.borrow());
    }
}
