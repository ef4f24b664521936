// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feed a gesture stream to the coordinator, with nested donors.
//!
//! A palette holds a group of swatches; both the palette and the group are
//! donors, and the nearest one wins. Drops resolve by the dragged swatch's
//! center and land behind existing children of the canvas.
//!
//! Run:
//! - `cargo run -p understory_examples --example dnd_gestures`

use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_dnd::config::{Config, DropAnchor, Placement};
use understory_dnd::coordinator::Coordinator;
use understory_dnd::delegate::{AbsorberDelegate, DonorDelegate};
use understory_dnd::gesture::GestureEvent;
use understory_view_tree::{LocalNode, NodeId, Tree};

struct Named(&'static str);

impl DonorDelegate<NodeId, ()> for Named {
    fn did_begin(&self, _donor: NodeId, element: NodeId) {
        println!("    {} lifted {element:?}", self.0);
    }

    fn did_donate(&self, _donor: NodeId, element: NodeId) {
        println!("    {} donated {element:?}", self.0);
    }

    fn did_reclaim(&self, _donor: NodeId, element: NodeId) {
        println!("    {} reclaimed {element:?}", self.0);
    }
}

impl AbsorberDelegate<NodeId, ()> for Named {
    fn did_absorb(&self, _absorber: NodeId, element: NodeId, _payload: Option<&()>) {
        println!("    {} absorbed {element:?}", self.0);
    }
}

fn main() {
    let mut tree = Tree::new();
    let window = tree.insert(None, LocalNode::with_frame(Rect::new(0.0, 0.0, 800.0, 600.0)));
    let palette = tree.insert(Some(window), LocalNode::with_frame(Rect::new(0.0, 0.0, 200.0, 600.0)));
    let group = tree.insert(Some(palette), LocalNode::with_frame(Rect::new(10.0, 10.0, 190.0, 300.0)));
    let red = tree.insert(Some(group), LocalNode::with_frame(Rect::new(10.0, 10.0, 50.0, 50.0)));
    let blue = tree.insert(Some(palette), LocalNode::with_frame(Rect::new(20.0, 320.0, 60.0, 360.0)));
    let canvas = tree.insert(Some(window), LocalNode::with_frame(Rect::new(200.0, 0.0, 800.0, 600.0)));
    let backdrop = tree.insert(Some(canvas), LocalNode::with_frame(Rect::new(0.0, 0.0, 600.0, 40.0)));

    let palette_delegate = Rc::new(Named("palette"));
    let group_delegate = Rc::new(Named("group"));
    let canvas_delegate = Rc::new(Named("canvas"));

    let mut dnd: Coordinator<NodeId> = Coordinator::with_config(Config {
        drop_anchor: DropAnchor::ElementCenter,
        placement: Placement::Back,
    });
    let reg = dnd.registry_mut();
    reg.register_draggable(red);
    reg.register_draggable(blue);
    reg.register_donor(palette, Rc::downgrade(&palette_delegate))
        .expect("palette delegate is alive");
    reg.register_donor(group, Rc::downgrade(&group_delegate))
        .expect("group delegate is alive");
    reg.register_absorber(canvas, Rc::downgrade(&canvas_delegate))
        .expect("canvas delegate is alive");

    let gestures = [
        // Red comes from the group, the nearest donor.
        GestureEvent::Pickup { element: red, point: Point::new(25.0, 25.0) },
        GestureEvent::Move { point: Point::new(150.0, 60.0) },
        // Pointer is still over the palette, but the swatch's center is on the canvas.
        GestureEvent::Release { point: Point::new(190.0, 60.0) },
        // Blue is cancelled halfway.
        GestureEvent::Pickup { element: blue, point: Point::new(40.0, 340.0) },
        GestureEvent::Move { point: Point::new(300.0, 340.0) },
        GestureEvent::Cancel,
        // Stray events with no session are ignored.
        GestureEvent::Release { point: Point::new(0.0, 0.0) },
    ];
    for event in gestures {
        println!("{event:?}");
        let transition = dnd.handle(&mut tree, event);
        println!("  -> {transition:?}");
    }

    println!("\ncanvas children, back to front:");
    for child in tree.children(canvas) {
        let name = match *child {
            c if c == red => "red",
            c if c == backdrop => "backdrop",
            _ => "?",
        };
        println!("  {name} {:?}", tree.world_frame(*child).expect("child is alive"));
    }
    println!("blue is back in the palette: {}", tree.parent(blue) == Some(palette));
}
