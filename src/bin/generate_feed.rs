use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::json;

use fusion_reshape::{
    parse_feed, quarterly_rows, select_by_version_spec, separate_into_groups, GroupSpec,
    Value, VersionSpec, DEFAULT_MONTHS_PER_QUARTER,
};

/// Minimal deterministic PRNG (LCG) so the sample feed is reproducible.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 16
    }

    /// Uniform value in `[lo, hi)`.
    fn in_range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo)
    }
}

fn format_money(raw: u64) -> String {
    let mut digits = raw.to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = format!(",{tail}{grouped}");
    }
    format!("${digits}{grouped}")
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);

    let regions = [("E", "East"), ("W", "West"), ("N", "North")];
    let channels = [("ONL", "Online"), ("RET", "Retail")];

    // Two years of monthly observations per region × channel.
    let months: Vec<NaiveDate> = (0..24u32)
        .map(|i| NaiveDate::from_ymd_opt(2023 + (i / 12) as i32, 1 + i % 12, 15))
        .collect::<Option<Vec<_>>>()
        .context("building sample months")?;

    let mut period_raw = Vec::new();
    let mut period_fmt = Vec::new();
    let mut region_raw = Vec::new();
    let mut region_fmt = Vec::new();
    let mut channel_raw = Vec::new();
    let mut channel_fmt = Vec::new();
    let mut sales_raw = Vec::new();
    let mut sales_fmt = Vec::new();

    for month in &months {
        for (region_code, region_label) in &regions {
            for (channel_code, channel_label) in &channels {
                let sales = rng.in_range(50_000, 250_000);
                period_raw.push(json!(month.format("%Y-%m-%d").to_string()));
                period_fmt.push(json!(month.format("%b %Y").to_string()));
                region_raw.push(json!(region_code));
                region_fmt.push(json!(region_label));
                channel_raw.push(json!(channel_code));
                channel_fmt.push(json!(channel_label));
                sales_raw.push(json!(sales));
                sales_fmt.push(json!(format_money(sales)));
            }
        }
    }

    let feed = json!({
        "period":  { "raw_data": period_raw,  "formatted_data": period_fmt },
        "region":  { "raw_data": region_raw,  "formatted_data": region_fmt },
        "channel": { "raw_data": channel_raw, "formatted_data": channel_fmt },
        "sales":   { "raw_data": sales_raw,   "formatted_data": sales_fmt },
    });

    let output_path = "sample_feed.json";
    let text = serde_json::to_string_pretty(&feed)?;
    std::fs::write(output_path, &text).context("writing sample feed")?;

    // Smoke pass: drive the generated feed through the full pipeline.
    let table = parse_feed(&text)?;
    let spec = VersionSpec {
        formatted_columns: vec!["region".to_string(), "channel".to_string()],
        unformatted_columns: vec!["sales".to_string()],
        date_columns: vec!["period".to_string()],
    };
    let store = select_by_version_spec(&table, &spec)?;
    let groups = separate_into_groups(&store, &GroupSpec::by_columns(["region", "channel"]))?;
    let dates: Vec<_> = store
        .column("period")?
        .iter()
        .filter_map(Value::as_date)
        .copied()
        .collect();
    let quarterly = quarterly_rows(&store, &dates, DEFAULT_MONTHS_PER_QUARTER)?;

    println!(
        "Wrote {} rows ({} groups, {} quarterly rows) to {output_path}",
        store.row_count(),
        groups.len(),
        quarterly.row_count()
    );
    Ok(())
}
