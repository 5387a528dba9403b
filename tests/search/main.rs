#![allow(clippy::cast_precision_loss)]

#[allow(dead_code)]
#[path = "../../benches/datasets.rs"]
mod datasets;

mod neighbourhood;
mod random;
mod swarm;
