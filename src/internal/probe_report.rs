#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::error::Error;

use hashtab::{LinProbTable, ResizePolicy, SepChainTable, SlotHasher, compare, hash};
use plotters::prelude::*;
use rand::{Rng, distr::Alphanumeric};
use tracing::info;
use tracing_subscriber::EnvFilter;

// Prime, so the division method spreads random keys evenly
const TABLE_SIZE: usize = 100_003;
// Load factors from 0.1 to 0.95 in 10 steps
const NUM_LOAD_FACTORS: usize = 10;
const KEY_LEN: usize = 12;

const METHODS: [&str; 6] = [
    "Linear probing, division",
    "Linear probing, Knuth",
    "Linear probing, kr2e strings",
    "Chaining, division",
    "Chaining, Knuth",
    "Chaining, kr2e strings",
];

#[derive(Debug, Clone, Copy, Default)]
struct Sample {
    average: f64,
    worst: usize,
}

fn summarize(probes: impl Iterator<Item = usize>) -> Sample {
    let (count, total, worst) = probes
        .fold((0_usize, 0_usize, 0_usize), |(count, total, worst), probes| {
            (count + 1, total + probes, worst.max(probes))
        });
    if count == 0 {
        Sample::default()
    } else {
        Sample { average: total as f64 / count as f64, worst }
    }
}

// Fixed policy: the capacity never moves, so the load factor is exactly keys / TABLE_SIZE
fn sample_linprob<K, H>(hasher: H, keys: &[K]) -> Sample
where
    K: Ord + Clone,
    H: SlotHasher<K>,
{
    let mut table = LinProbTable::new(TABLE_SIZE, hasher, compare::natural::<K>)
        .with_policy(ResizePolicy::fixed());
    for key in keys {
        table.put(key.clone(), ());
    }
    summarize(keys.iter().map(|key| table.probe_len(key)))
}

fn sample_sepchain<K, H>(hasher: H, keys: &[K]) -> Sample
where
    K: Ord + Clone,
    H: SlotHasher<K>,
{
    let mut table = SepChainTable::new(TABLE_SIZE, hasher, compare::natural::<K>);
    for key in keys {
        table.put(key.clone(), ());
    }
    summarize(keys.iter().map(|key| table.probe_len(key)))
}

fn draw_chart<Y>(
    path: &str,
    caption: &str,
    y_desc: &str,
    x_labels: &[String],
    series: &[Vec<Y>],
) -> Result<(), Box<dyn Error>>
where
    Y: Copy + Into<f64>,
{
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),
        RGBColor(50, 90, 220),
        RGBColor(50, 180, 50),
        RGBColor(180, 50, 180),
        RGBColor(230, 140, 20),
        RGBColor(20, 160, 170),
    ];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|values| values.iter().map(|&y| Into::<f64>::into(y)))
        .fold(0.0, f64::max) *
        1.1;
    let last = x_labels.len().saturating_sub(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..last, 0.0..max_y.max(1.0))?;

    chart
        .configure_mesh()
        .x_labels(x_labels.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Load Factor")
        .y_desc(y_desc)
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(line_width);
        let points: Vec<(usize, f64)> = series[method_idx]
            .iter()
            .enumerate()
            .map(|(i, &y)| (i, Into::<f64>::into(y)))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), line_style))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
        chart.draw_series(
            points.into_iter().map(|point| Circle::new(point, marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();
    info!(?load_factors, ?num_keys, capacity = TABLE_SIZE, "starting probe report");

    // Same keys for every method
    let mut rng = rand::rng();
    let max_keys_needed = num_keys.iter().copied().max().unwrap_or(0);
    let int_keys: Vec<u64> = (0..max_keys_needed).map(|_| rng.random()).collect();
    let str_keys: Vec<String> = (0..max_keys_needed)
        .map(|_| (&mut rng).sample_iter(&Alphanumeric).take(KEY_LEN).map(char::from).collect())
        .collect();

    let mut average_probes: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut worst_case_probes: Vec<Vec<u32>> = vec![Vec::new(); METHODS.len()];

    for &n_keys in &num_keys {
        let ints = &int_keys[..n_keys];
        let strs = &str_keys[..n_keys];
        let samples = [
            sample_linprob(hash::int_div::<u64>, ints),
            sample_linprob(hash::int_mult_knuth::<u64>, ints),
            sample_linprob(hash::str_kr2e::<String>, strs),
            sample_sepchain(hash::int_div::<u64>, ints),
            sample_sepchain(hash::int_mult_knuth::<u64>, ints),
            sample_sepchain(hash::str_kr2e::<String>, strs),
        ];

        for (method_idx, (&method, sample)) in METHODS.iter().zip(samples).enumerate() {
            info!(
                keys = n_keys,
                method,
                average = sample.average,
                worst = sample.worst,
                "measured probe lengths"
            );
            average_probes[method_idx].push(sample.average);
            worst_case_probes[method_idx].push(u32::try_from(sample.worst).unwrap_or(u32::MAX));
        }
    }

    let x_labels: Vec<String> = load_factors.iter().map(|load| format!("{load:.2}")).collect();
    draw_chart(
        "average_probes.png",
        "Average Probe Length by Load Factor",
        "Average Probes per Lookup",
        &x_labels,
        &average_probes,
    )?;
    draw_chart(
        "worst_case_probes.png",
        "Worst-Case Probe Length by Load Factor",
        "Worst-Case Probes",
        &x_labels,
        &worst_case_probes,
    )?;

    info!("wrote average_probes.png and worst_case_probes.png");
    Ok(())
}
