use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use ordset::OrderedSet;

/// Builds two sets of real numbers and prints what the set operations make of them.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Values inserted into set A, in the given order
    #[arg(short = 'a', long = "set-a", num_args = 1.., allow_negative_numbers = true,
          default_values = ["3.14", "2.71", "1.41", "3.14"])]
    set_a: Vec<f64>,

    /// Values inserted into set B, in the given order
    #[arg(short = 'b', long = "set-b", num_args = 1.., allow_negative_numbers = true,
          default_values = ["2.71", "3.14"])]
    set_b: Vec<f64>,

    /// Membership queries run against A before the removal
    #[arg(long, num_args = 1.., allow_negative_numbers = true, default_values = ["2.71", "5"])]
    probe: Vec<f64>,

    /// Value removed from A before the set algebra step
    #[arg(long, allow_negative_numbers = true, default_value = "2.71")]
    remove: f64,
}

fn yes_no(answer: bool) -> &'static str {
    if answer { "Yes" } else { "No" }
}

fn build(name: &str, values: &[f64]) -> OrderedSet<f64> {
    let mut set = OrderedSet::with_capacity(values.len());
    for &value in values {
        if set.insert(value) {
            debug!("{name}: inserted {value}");
        } else if value.is_nan() {
            warn!("{name}: NaN cannot be ordered, skipped");
        } else {
            warn!("{name}: {value} is already a member, skipped");
        }
    }
    set
}

fn run(args: &Args, out: &mut impl Write) -> io::Result<()> {
    info!("building A from {} values and B from {} values", args.set_a.len(), args.set_b.len());
    let mut a = build("A", &args.set_a);
    writeln!(out, "Set: {}", a.labeled("A"))?;

    for probe in &args.probe {
        writeln!(out, "Is there {probe}? {}", yes_no(a.contains(probe)))?;
    }

    if a.remove(&args.remove) {
        debug!("A: removed {}", args.remove);
    } else {
        warn!("A: {} is not a member, nothing removed", args.remove);
    }
    writeln!(out, "After deleting {}: {}", args.remove, a.labeled("A"))?;

    let b = build("B", &args.set_b);
    writeln!(out, "{}", b.labeled("B"))?;

    info!("computing set algebra over |A| = {} and |B| = {}", a.len(), b.len());
    writeln!(out, "{}", (&a | &b).labeled("C"))?;
    writeln!(out, "{}", (&a & &b).labeled("D"))?;
    writeln!(out, "{}", (&a - &b).labeled("E"))?;
    writeln!(out, "{}", (&a ^ &b).labeled("F"))?;

    writeln!(out, "Is A subset of B? {}", yes_no(a.is_subset(&b)))?;
    writeln!(out, "Is B subset of A? {}", yes_no(b.is_subset(&a)))?;
    writeln!(out, "Is A subset of A? {}", yes_no(a.is_subset(&a)))?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    debug!("{args:?}");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out).context("failed to write the walkthrough to stdout")?;
    out.flush().context("failed to flush stdout")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn walkthrough(argv: &[&str]) -> String {
        let args = Args::try_parse_from(argv).expect("arguments parse");
        let mut out = Vec::new();
        run(&args, &mut out).expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("output is UTF-8")
    }

    #[test]
    fn default_walkthrough() {
        let expected = "\
Set: A = { 1.41, 2.71, 3.14 }
Is there 2.71? Yes
Is there 5? No
After deleting 2.71: A = { 1.41, 3.14 }
B = { 2.71, 3.14 }
C = { 1.41, 2.71, 3.14 }
D = { 3.14 }
E = { 1.41 }
F = { 1.41, 2.71 }
Is A subset of B? No
Is B subset of A? No
Is A subset of A? Yes
";
        assert_eq!(walkthrough(&["ordset"]), expected);
    }

    #[test]
    fn custom_sets_and_negative_values() {
        let output = walkthrough(&["ordset", "-a", "-1", "2", "--set-b", "2", "-1", "7", "--remove", "9", "--probe", "-1"]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Set: A = { -1, 2 }");
        assert_eq!(lines[1], "Is there -1? Yes");
        assert_eq!(lines[2], "After deleting 9: A = { -1, 2 }");
        assert_eq!(lines[3], "B = { -1, 2, 7 }");
        assert_eq!(lines[6], "E = { }");
        assert_eq!(lines[8], "Is A subset of B? Yes");
    }

    #[test]
    fn nan_is_skipped() {
        let output = walkthrough(&["ordset", "-a", "NaN", "1", "--remove", "1", "--probe", "NaN"]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Set: A = { 1 }");
        assert_eq!(lines[1], "Is there NaN? No");
        assert_eq!(lines[2], "After deleting 1: A = { }");
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(Args::try_parse_from(["ordset", "-a", "pi"]).is_err());
    }
}
