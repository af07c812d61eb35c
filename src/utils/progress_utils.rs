use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over the simulation's answers. Hidden when `quiet` is set.
pub fn progress_bar(len: u64, msg: String, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    bar.set_style(style);
    bar.set_message(msg);

    bar
}
