// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment tree basics.
//!
//! Build a sum tree, apply a range update and a point update, and render after each step.
//!
//! Run:
//! - `cargo run -p understory_demos --example segtree_basics`

use understory_segtree::{Sum, SumTree};

fn show(title: &str, tree: &SumTree<i64>) -> anyhow::Result<()> {
    println!("\n{title}:");
    for line in tree.render()? {
        println!("{line}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut tree = SumTree::build_from(Sum, &[1_i64, 3, 5, 7, 9, 11])?;
    show("built", &tree)?;
    println!("sum [1, 4] = {}", tree.range_query(1, 4)?);

    tree.range_update(1, 3, 5)?;
    show("after adding 5 to [1, 3]", &tree)?;
    println!("sum [1, 4] = {}", tree.range_query(1, 4)?);

    tree.point_update(2, 15)?;
    show("after setting [2] = 15", &tree)?;
    let sum = tree.range_query(1, 4)?;
    println!("sum [1, 4] = {sum}");
    assert_eq!(sum, 44, "8 + 15 + 12 + 9");
    Ok(())
}
