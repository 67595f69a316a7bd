// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive segment tree session on stdin/stdout.
//!
//! Reads the element count, the elements, and a tree type (1 sum, 2 min, 3 max), then
//! loops over a menu: 1 point update, 2 range query, 3 range update, 4 exit.
//! The tree is re-rendered after every update. Input is whitespace separated, so a
//! whole session can be piped in:
//!
//! Run:
//! - `echo "6 1 3 5 7 9 11 1 2 1 4 3 1 3 5 2 1 4 4" | cargo run -p understory_demos --example segtree_repl`

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, bail};
use log::{debug, info, warn};
use understory_segtree::{Aggregation, SegmentTree};

/// Whitespace-separated tokens from a reader, refilled line by line.
struct Tokens<R> {
    reader: R,
    pending: Vec<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
        }
    }

    /// Next token parsed as `T`, or `None` at end of input.
    fn next_token<T>(&mut self) -> anyhow::Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line).context("reading stdin")? == 0 {
                return Ok(None);
            }
            self.pending = line.split_whitespace().rev().map(String::from).collect();
        }
        let Some(tok) = self.pending.pop() else {
            return Ok(None);
        };
        let v = tok
            .parse()
            .with_context(|| format!("could not parse {tok:?}"))?;
        Ok(Some(v))
    }

    fn expect<T>(&mut self, what: &str) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.next_token()? {
            Some(v) => Ok(v),
            None => bail!("unexpected end of input while reading {what}"),
        }
    }
}

fn prompt(text: &str) -> anyhow::Result<()> {
    print!("{text}");
    io::stdout().flush().context("flushing stdout")
}

fn visualize(tree: &SegmentTree<i64, Aggregation>) -> anyhow::Result<()> {
    println!("\nVisualized Segment Tree:");
    for line in tree.render()? {
        println!("{line}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let stdin = io::stdin();
    let mut input = Tokens::new(stdin.lock());

    prompt("Enter number of elements (e.g., 6): ")?;
    let n: usize = input.expect("the element count")?;
    prompt("Enter elements separated by space (e.g., 1 3 5 7 9 11): ")?;
    let mut values = Vec::with_capacity(n);
    for i in 0..n {
        values.push(input.expect::<i64>(&format!("element {i}"))?);
    }

    prompt("\nChoose Tree Type:\n1. Sum\n2. Min\n3. Max\nChoice: ")?;
    let agg = match input.expect::<u32>("the tree type")? {
        1 => Aggregation::Sum,
        2 => Aggregation::Min,
        _ => Aggregation::Max,
    };
    info!("building {} tree over {n} elements", agg.name());

    let mut tree = SegmentTree::build_from(agg, &values).context("building the tree")?;
    visualize(&tree)?;

    loop {
        prompt("\n1. Update Index\n2. Range Query\n3. Range Update\n4. Exit\nEnter Operation: ")?;
        let Some(op) = input.next_token::<u32>()? else {
            break;
        };
        debug!("operation {op}");
        let outcome = match op {
            1 => {
                prompt("Enter index and value (e.g., 2 10): ")?;
                let idx = input.expect("the index")?;
                let val = input.expect("the value")?;
                tree.point_update(idx, val).map(|()| true)
            }
            2 => {
                prompt("Enter range [l r] (e.g., 1 4): ")?;
                let lo = input.expect("the range start")?;
                let hi = input.expect("the range end")?;
                tree.range_query(lo, hi).map(|v| {
                    println!("Result: {v}");
                    false
                })
            }
            3 => {
                prompt("Enter range [l r] and value to add (e.g., 1 3 5): ")?;
                let lo = input.expect("the range start")?;
                let hi = input.expect("the range end")?;
                let delta = input.expect("the value to add")?;
                tree.range_update(lo, hi, delta).map(|()| true)
            }
            _ => break,
        };
        match outcome {
            Ok(true) => visualize(&tree)?,
            Ok(false) => {}
            Err(e) => {
                warn!("rejected operation {op}: {e}");
                println!("Error: {e}");
            }
        }
    }

    info!("session finished");
    Ok(())
}
