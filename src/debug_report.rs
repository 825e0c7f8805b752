use chrono::{NaiveDateTime, NaiveTime};
use trigline::debounce::MeetTracker;
use trigline::{ParseResultVerbose, TriggerRule, WallClock};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
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

        pub fn verdict(&self, ok: bool) -> String {
            if ok { self.paint("✓", GREEN) } else { self.paint("✗", RED) }
        }
    }
}

/// Runtime context the rule is checked against.
pub struct Evaluation<'a> {
    pub now: NaiveDateTime,
    pub clock: WallClock,
    pub params: &'a [(&'a str, Option<&'a str>)],
}

pub fn print_run(res: &ParseResultVerbose, eval: &Evaluation<'_>, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Descriptor: \"{}\"", res.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Rule ━━━", ansi::GRAY));
    print_rule(&res.rule, &palette);

    println!("\n{}", palette.paint("━━━ Diagnostics ━━━", ansi::GRAY));
    print_diagnostics(res, &palette);

    println!("\n{}", palette.paint("━━━ Decision ━━━", ansi::GRAY));
    print_decision(&res.rule, eval, &palette);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Parse: {}", palette.paint(format!("{:?}", res.details.elapsed), ansi::GREEN));
    println!();
}

fn print_rule(rule: &TriggerRule, palette: &ansi::Palette) {
    if rule.is_empty() {
        println!("  {}", palette.dim("(empty rule)"));
        return;
    }

    let event = if rule.event_name().is_empty() { palette.dim("(none)") } else { palette.bold(rule.event_name()) };
    println!("  {} {}", palette.paint("event:", ansi::BLUE), event);
    println!(
        "  {} {} {} {}",
        palette.paint("window:", ansi::BLUE),
        fmt_bound(rule.start_valid_time(), palette),
        palette.dim("→"),
        fmt_bound(rule.end_valid_time(), palette),
    );
    if rule.valid_window().crosses_midnight() {
        println!("          {}", palette.dim("(crosses midnight)"));
    }
    let delay = rule.delay().map(|d| format!("{}s", d.as_secs()));
    println!("  {} {}", palette.paint("delay:", ansi::BLUE), fmt_opt(delay, palette));
    println!(
        "  {} {}  {} {}",
        palette.paint("meet count:", ansi::BLUE),
        fmt_opt(rule.meet_count().map(|n| n.to_string()), palette),
        palette.paint("prev meet count:", ansi::BLUE),
        fmt_opt(rule.prev_meet_count().map(|n| n.to_string()), palette),
    );

    let params: Vec<_> = rule.params().collect();
    if params.is_empty() {
        println!("  {} {}", palette.paint("params:", ansi::BLUE), palette.dim("(none)"));
    } else {
        println!("  {}", palette.paint("params:", ansi::BLUE));
        for (key, value) in params {
            println!(
                "    {} {} {}",
                palette.paint(key, ansi::CYAN),
                palette.dim("="),
                palette.paint(value, ansi::YELLOW)
            );
        }
    }
}

fn print_diagnostics(res: &ParseResultVerbose, palette: &ansi::Palette) {
    let labels = res.details.recognized.labels();
    let recognized = if labels.is_empty() { palette.dim("nothing") } else { labels.join(", ") };
    println!("  {} {}", palette.paint("recognized:", ansi::BLUE), recognized);

    if res.details.rejected.is_empty() {
        println!("  {}", palette.dim("No values ignored"));
        return;
    }
    for rejection in &res.details.rejected {
        println!(
            "  {} {}={} {}",
            palette.paint("ignored:", ansi::YELLOW),
            palette.paint(&rejection.key, ansi::CYAN),
            palette.paint(format!("{:?}", rejection.value), ansi::YELLOW),
            palette.dim(format!("({})", rejection.reason)),
        );
    }
}

fn print_decision(rule: &TriggerRule, eval: &Evaluation<'_>, palette: &ansi::Palette) {
    println!(
        "  {} {} {}",
        palette.paint("at:", ansi::BLUE),
        eval.now.format("%Y-%m-%d %H:%M:%S"),
        palette.dim(format!("({} clock)", eval.clock)),
    );

    let in_window = rule.is_in_valid_time(eval.now);
    println!("  {} window", palette.verdict(in_window));

    for (name, value) in eval.params {
        let ok = rule.has_param_value_or_unset(name, *value);
        let shown = value.map_or_else(|| palette.dim("(absent)"), |v| format!("{v:?}"));
        let note = if rule.is_excluded(name, *value) {
            palette.dim("excluded")
        } else if let Some(stored) = rule.get_param_value(name) {
            palette.dim(format!("expects {stored:?}"))
        } else {
            palette.dim("unset, any value")
        };
        println!("  {} {}={}  {}", palette.verdict(ok), palette.paint(name, ansi::CYAN), shown, note);
    }

    let fires = rule.permits(eval.now, eval.params);
    let verdict = if fires {
        palette.bold(palette.paint("FIRE", ansi::GREEN))
    } else {
        palette.bold(palette.paint("HOLD", ansi::RED))
    };
    println!("\n  {} {}", palette.paint("decision:", ansi::BLUE), verdict);

    if fires {
        if let Some(delay) = rule.delay() {
            println!("  {}", palette.dim(format!("after a {}s delay", delay.as_secs())));
        }
        let tracker = MeetTracker::for_rule(rule);
        if tracker.meet_threshold() > 1 {
            println!("  {}", palette.dim(format!("once met {} times in a row", tracker.meet_threshold())));
        }
        if tracker.release_threshold() > 1 {
            println!("  {}", palette.dim(format!("released after {} misses in a row", tracker.release_threshold())));
        }
    }
}

fn fmt_bound(bound: Option<NaiveTime>, palette: &ansi::Palette) -> String {
    match bound {
        Some(t) => palette.paint(t.format("%H:%M").to_string(), ansi::GREEN),
        None => palette.dim("open"),
    }
}

fn fmt_opt(value: Option<String>, palette: &ansi::Palette) -> String {
    value.unwrap_or_else(|| palette.dim("-"))
}
