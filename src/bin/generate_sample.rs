//! Writes a deterministic synthetic export directory for manual testing.
//!
//! Usage: `cargo run --bin generate_sample -- [OUTPUT_DIR]` (default `./data`).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// Hour of day, mostly during working hours.
    fn hour(&mut self) -> i64 {
        const HOURS: [i64; 16] = [8, 9, 9, 10, 11, 12, 13, 14, 14, 15, 17, 18, 20, 21, 22, 23];
        HOURS[self.below(HOURS.len())]
    }
}

const FIRST_NAMES: [&str; 8] = ["Alice", "Bruno", "Chloé", "David", "Emma", "Farid", "Greta", "Hugo"];
const LAST_NAMES: [&str; 8] = ["Martin", "Bernard", "Dubois", "Moreau", "Laurent", "Simon", "Michel", "Lefebvre"];
const COMPANIES: [&str; 7] = ["Acme", "Globex", "Initech", "Umbrella", "Hooli", "Stark Industries", "Wayne Enterprises"];
const ROLES: [&str; 6] = ["Data Analyst", "Data Engineer", "Software Engineer", "Product Manager", "Data Scientist", "Recruiter"];
const SECTORS: [&str; 5] = ["Technology", "Finance", "Healthcare", "Retail", "Energy"];
const REACTIONS: [&str; 4] = ["LIKE", "PRAISE", "EMPATHY", "INTEREST"];

fn start() -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2023, 1, 2)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")
}

fn interactions(rng: &mut SimpleRng, days: i64, per_day: f64) -> Result<Vec<NaiveDateTime>> {
    let origin = start()?;
    let mut out = Vec::new();
    for day in 0..days {
        // Busier in spring and autumn.
        let season = 1.0 + 0.6 * ((day as f64 / 365.0) * 4.0 * std::f64::consts::PI).sin();
        let expected = per_day * season;
        let mut n = expected.floor() as usize;
        if rng.next_f64() < expected.fract() {
            n += 1;
        }
        for _ in 0..n {
            let at = origin
                + Duration::days(day)
                + Duration::hours(rng.hour())
                + Duration::minutes(rng.below(60) as i64)
                + Duration::seconds(rng.below(60) as i64);
            out.push(at);
        }
    }
    out.sort();
    Ok(out)
}

fn write_reactions(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut w = csv::Writer::from_path(dir.join("Reactions.csv"))?;
    w.write_record(["Date", "Type", "Link"])?;
    let rows = interactions(rng, 540, 0.9)?;
    for (i, at) in rows.iter().enumerate() {
        w.write_record([
            at.format("%Y-%m-%d %H:%M:%S").to_string(),
            rng.pick(&REACTIONS).to_string(),
            format!("https://example.com/feed/update/{i}"),
        ])?;
    }
    w.flush()?;
    Ok(rows.len())
}

fn write_comments(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut w = csv::Writer::from_path(dir.join("Comments.csv"))?;
    w.write_record(["Date", "Link", "Message"])?;
    let rows = interactions(rng, 540, 0.25)?;
    for (i, at) in rows.iter().enumerate() {
        w.write_record([
            at.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("https://example.com/feed/update/c{i}"),
            "Great post, thanks for sharing!".to_string(),
        ])?;
    }
    w.flush()?;
    Ok(rows.len())
}

/// Connections come with a free-text preamble before the header row.
fn write_connections(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut file = File::create(dir.join("Connections.csv"))?;
    writeln!(file, "Notes:")?;
    writeln!(
        file,
        "\"When exporting your connection data, you may notice that some of the email addresses are missing.\""
    )?;
    writeln!(file)?;

    let mut w = csv::Writer::from_writer(file);
    w.write_record([
        "First Name",
        "Last Name",
        "URL",
        "Email Address",
        "Company",
        "Position",
        "Connected On",
        "Sector",
    ])?;
    let origin = start()?.date() - Duration::days(400);
    let count = 180;
    for i in 0..count {
        let day = origin + Duration::days(rng.below(940) as i64);
        let sector = if rng.below(10) == 0 {
            ""
        } else {
            rng.pick(&SECTORS)
        };
        let url = format!("https://example.com/in/member-{i}");
        let connected_on = day.format("%d %b %Y").to_string();
        w.write_record([
            rng.pick(&FIRST_NAMES),
            rng.pick(&LAST_NAMES),
            url.as_str(),
            "",
            rng.pick(&COMPANIES),
            rng.pick(&ROLES),
            connected_on.as_str(),
            sector,
        ])?;
    }
    w.flush()?;
    Ok(count)
}

fn write_saved_jobs(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let jobs_dir = dir.join("jobs");
    fs::create_dir_all(&jobs_dir)?;
    let mut w = csv::Writer::from_path(jobs_dir.join("Saved Jobs.csv"))?;
    w.write_record(["Saved Date", "Job Url", "Job Title", "Company Name"])?;
    let origin = start()?;
    let count = 60;
    for i in 0..count {
        let at = origin
            + Duration::days(200 + rng.below(300) as i64)
            + Duration::hours(rng.hour())
            + Duration::minutes(rng.below(60) as i64);
        w.write_record([
            at.format("%m/%d/%y, %I:%M %p").to_string(),
            format!("https://example.com/jobs/view/{i}"),
            rng.pick(&ROLES).to_string(),
            rng.pick(&COMPANIES).to_string(),
        ])?;
    }
    w.flush()?;
    Ok(count)
}

fn write_positions(dir: &Path) -> Result<usize> {
    let mut w = csv::Writer::from_path(dir.join("Positions.csv"))?;
    w.write_record([
        "Company Name",
        "Title",
        "Description",
        "Location",
        "Started On",
        "Finished On",
    ])?;
    let rows = [
        ("Globex", "Data Analyst Intern", "Jun 2019", "Dec 2019"),
        ("Initech", "Data Analyst", "Jan 2020", "Aug 2023"),
        ("Hooli", "Data Engineer", "Sep 2023", ""),
    ];
    for (company, title, from, to) in rows {
        w.write_record([company, title, "", "Paris", from, to])?;
    }
    w.flush()?;
    Ok(rows.len())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./data"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let reactions = write_reactions(&out_dir, &mut rng).context("writing Reactions.csv")?;
    let comments = write_comments(&out_dir, &mut rng).context("writing Comments.csv")?;
    let connections =
        write_connections(&out_dir, &mut rng).context("writing Connections.csv")?;
    let jobs = write_saved_jobs(&out_dir, &mut rng).context("writing Saved Jobs.csv")?;
    let positions = write_positions(&out_dir).context("writing Positions.csv")?;

    println!(
        "Wrote {reactions} reactions, {comments} comments, {connections} connections, \
         {jobs} saved jobs and {positions} positions to {}",
        out_dir.display()
    );
    Ok(())
}
