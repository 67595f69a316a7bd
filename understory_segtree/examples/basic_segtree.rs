// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Segment Tree: build, update, query, render.

use understory_segtree::{Min, MinTree};

fn main() {
    let mut tree = MinTree::build_from(Min, &[5_i64, 2, 8, 1, 9]).unwrap();
    println!("min [0, 4] = {:?}", tree.range_query(0, 4));

    // Shift the first two elements up.
    tree.range_update(0, 1, 10).unwrap();
    println!("min [0, 1] = {:?}", tree.range_query(0, 1));

    for line in tree.render().unwrap() {
        println!("{line}");
    }
}
