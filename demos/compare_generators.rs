//! Compare the single-pass and level-of-detail cave generators
//!
//! Sweeps both generators over a few configurations, evaluates every pair of
//! top-down metrics and prints clustering and space coverage per pair.
//! Set `RUST_LOG=cave_automata=debug` to follow the sweep.

use cave_automata::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("cave_automata=info".parse().unwrap()))
        .init();

    println!("=== Cave Generator Comparison ===\n");

    let gameplay = GameplayType::TopDown;
    let coarse = CaveOptions::sweep_presets();
    let detail = CaveOptions::detail_presets();
    let (coarse_count, detail_count) = (3usize, 2usize);
    let iterations = 3;

    // Step 1: Single-pass generator, one option set per configuration
    let mut caves = CaveGenerator::new(48, 48, 1);
    caves.set_cost_function(gameplay.cost_function());
    let options = coarse.clone();
    let mut first = Sweep::new("0", caves, coarse_count, iterations * detail_count, move |g: &mut CaveGenerator, i| {
        g.set_options(options[i])
    });

    // Step 2: Level-of-detail generator, every coarse set with every detail set
    let mut lod = CaveLodGenerator::new(16, 16, 2);
    lod.set_cost_function(gameplay.cost_function());
    println!("LOD output size: {:?}\n", lod.output_size());
    let mut second = Sweep::new(
        "1",
        lod,
        coarse_count * detail_count,
        iterations,
        move |g: &mut CaveLodGenerator, i| {
            g.set_layer_options(0, coarse[i / detail_count])?;
            g.set_layer_options(1, detail[i % detail_count])
        },
    );

    // Step 3: Compare every metric pair
    let metrics = gameplay.metrics();
    for comparison in compare(&mut first, &mut second, &metrics)? {
        println!("{comparison}");
    }

    println!("=== Comparison Complete ===");
    Ok(())
}
