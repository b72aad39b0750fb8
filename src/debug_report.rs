use phrasefinder::{Extraction, Lexicon, ParseResultVerbose, PrettyError, RunMetrics, canonical};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, res: &ParseResultVerbose, lexicon: &dyn Lexicon, color: bool) -> Result<(), PrettyError> {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Scanning: \"{}\"", input.trim_end()), ansi::CYAN)));

    if !res.details.tags.is_empty() {
        println!("\n{}", palette.paint("━━━ Tags ━━━", ansi::GRAY));
        let line: Vec<String> = res
            .details
            .tags
            .iter()
            .map(|t| format!("{}{}", t.text, palette.dim(format!("/{}", t.tag))))
            .collect();
        println!("  {}", line.join(" "));
    }

    println!("\n{}", palette.paint("━━━ Phrases ━━━", ansi::GRAY));
    if res.results.is_empty() {
        println!("{}", palette.dim("  No phrases emitted"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • Every hypothesis ended at or below the confidence threshold");
        println!("  • No word opened a hypothesis (names-only mode, unknown words)");
        println!("\n{}", palette.dim("  Tip: Set PHRASEFINDER_LOG=phrasefinder=trace to see dropped phrases"));
    } else {
        for (idx, ext) in res.results.iter().enumerate() {
            print_extraction(idx, ext, lexicon, &palette)?;
        }
    }

    println!("\n{}", palette.paint("━━━ Engine ━━━", ansi::GRAY));
    print_metrics(&res.details.metrics, &palette);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Total: {}", palette.paint(format!("{:?}", res.elapsed), ansi::GREEN));
    println!();
    Ok(())
}

fn print_extraction(
    idx: usize,
    ext: &Extraction,
    lexicon: &dyn Lexicon,
    palette: &ansi::Palette,
) -> Result<(), PrettyError> {
    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        palette.bold(palette.paint(&ext.value, ansi::GREEN)),
        palette.dim("│"),
        palette.paint(format!("span {}..{}", ext.start, ext.end), ansi::YELLOW),
    );
    println!(
        "      {} {}  {} {}  {} {}",
        palette.dim("kind:"),
        palette.paint(&ext.kind, ansi::BLUE),
        palette.dim("│ conf:"),
        palette.paint(ext.confidence.to_string(), ansi::CYAN),
        palette.dim("│"),
        palette.dim(canonical(&ext.phrase, lexicon)?),
    );
    println!("      {} {}", palette.dim("tree:"), palette.dim(ext.phrase.to_string()));
    Ok(())
}

fn print_metrics(metrics: &RunMetrics, palette: &ansi::Palette) {
    let count = |n: usize| palette.paint(n.to_string(), ansi::YELLOW);
    println!(
        "  words: {}  │  dispatched: {}  │  emitted: {}  │  dropped: {}",
        count(metrics.words),
        count(metrics.dispatches),
        count(metrics.emitted),
        count(metrics.dropped),
    );
    println!(
        "  compounds: {} built, {} replayed  │  stack: {}/{} push/pop  │  parallel: {} started, {} committed",
        count(metrics.compounds.built),
        count(metrics.compounds.replayed),
        count(metrics.stack.pushes),
        count(metrics.stack.pops),
        count(metrics.parallel.started),
        count(metrics.parallel.committed),
    );
}
