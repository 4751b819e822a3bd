use text_recognizer::{NodeSummary, RecognitionVerbose, Resolution};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        fn wrap(&self, s: &str, code: &str) -> String {
            if self.enabled { format!("{code}{s}{RESET}") } else { s.to_string() }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            self.wrap(s.as_ref(), color)
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.wrap(s.as_ref(), BOLD)
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.wrap(s.as_ref(), DIM)
        }
    }
}

/// Print one section per recognizer that produced anything, then a timing
/// table covering the whole battery.
pub fn print_runs(input: &str, runs: &[RecognitionVerbose], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Recognizing: \"{}\"", input), ansi::CYAN)));

    let productive: Vec<&RecognitionVerbose> =
        runs.iter().filter(|run| !run.details.all_candidates.is_empty()).collect();

    if productive.is_empty() {
        println!("\n{}", palette.dim("  No recognizer produced results"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • Rules were filtered out (check bucket/phrase requirements)");
        println!("  • Regex patterns didn't match");
        println!("  • Production functions returned None");
        println!("\n{}", palette.dim("  Tip: RUST_LOG=text_recognizer::engine=debug shows rule filtering details"));
    }

    for run in &productive {
        print_run(run, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    for run in runs {
        println!(
            "  {:<12} {}  │  Saturation: {}  │  Resolve: {}  │  Rules: {}",
            palette.paint(run.kind.name(), ansi::BLUE),
            palette.paint(format!("{:?}", run.elapsed), ansi::GREEN),
            palette.paint(format!("{:?}", run.details.saturation_total), ansi::CYAN),
            palette.dim(format!("{:?}", run.details.resolve)),
            palette.dim(run.details.active_rules.len().to_string()),
        );
    }
    println!();
}

fn print_run(run: &RecognitionVerbose, palette: &ansi::Palette) {
    let title = format!("━━━ {} ━━━", run.kind.name());
    println!("\n{}", palette.bold(palette.paint(title, ansi::MAGENTA)));

    println!("{}", palette.paint("Saturation:", ansi::GRAY));
    for pass in &run.details.saturation {
        let label = if pass.pass == 0 { "Pass 0 (regex):".to_string() } else { format!("Pass {}:", pass.pass) };

        println!(
            "  {} {} {}",
            palette.paint(label, ansi::BLUE),
            if pass.produced > 0 {
                palette.paint(format!("✓ {} tokens", pass.produced), ansi::GREEN)
            } else {
                palette.dim(format!("✗ {} tokens", pass.produced))
            },
            palette.dim(format!("({} rules seeded)", pass.rules_seeded))
        );

        for node in pass.samples.iter().take(5) {
            println!("    {}", fmt_node_compact(node, palette));
        }
        if pass.samples.len() > 5 {
            println!("    {}", palette.dim(format!("... +{} more", pass.samples.len() - 5)));
        }
    }

    println!("{}", palette.paint("Results:", ansi::GRAY));
    if run.results.is_empty() {
        println!("  {}", palette.dim("(candidates only, none selected)"));
    }
    for (idx, result) in run.results.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(&result.text, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(format!("span {}..{}", result.start, result.end), ansi::YELLOW),
        );
        println!("      {} {}", palette.dim("type:"), palette.paint(&result.type_name, ansi::BLUE));
        match &result.resolution {
            Resolution::Value(value) => {
                let mut line = value.value.clone();
                if let Some(unit) = &value.unit {
                    line.push(' ');
                    line.push_str(unit);
                }
                println!("      {} {}", palette.dim("value:"), palette.paint(line, ansi::CYAN));
            }
            Resolution::Values { values } => {
                for candidate in values {
                    println!(
                        "      {} {} {}",
                        palette.dim(format!("{}:", candidate.kind)),
                        palette.paint(candidate.value.render(), ansi::CYAN),
                        palette.dim(candidate.timex.as_deref().unwrap_or_default()),
                    );
                }
            }
        }
    }
}

fn fmt_node_compact(node: &NodeSummary, palette: &ansi::Palette) -> String {
    format!(
        "{} {} {}",
        palette.paint(format!("{}..{}", node.start, node.end), ansi::YELLOW),
        palette.paint(&node.rule, ansi::BLUE),
        palette.dim(&node.preview)
    )
}
