use {
    anyhow::{ensure, Context},
    clap::Parser,
    tracing::info,
    tracing_subscriber::{filter::LevelFilter, EnvFilter},
    uibox::{
        toolkit::headless::HeadlessToolkit,
        types::{Axis, PpxSuffix, Size},
        BoxContainer, Control, ControlExt, Label, ToolkitHandle,
    },
};

const MAX_EXTENT: i64 = 1_000_000;
const MAX_METRIC: i64 = 10_000;

/// Lays out a box of labels with the headless toolkit and prints the child rects.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Label texts. A trailing `*` marks the label as stretchy, e.g. `Name*`.
    #[arg(required = true)]
    items: Vec<String>,
    /// Arrange children from top to bottom instead of left to right.
    #[arg(long)]
    vertical: bool,
    /// Insert spacing between children.
    #[arg(long)]
    padded: bool,
    /// Box width. Defaults to the preferred width.
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=MAX_EXTENT))]
    width: Option<i32>,
    /// Box height. Defaults to the preferred height.
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=MAX_EXTENT))]
    height: Option<i32>,
    /// Spacing between children of a padded box.
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(i32).range(0..=MAX_METRIC))]
    padding: i32,
    /// Width of one label character.
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(i32).range(0..=MAX_METRIC))]
    char_width: i32,
    /// Height of a label.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(i32).range(0..=MAX_METRIC))]
    line_height: i32,
}

fn parse_item(item: &str) -> (&str, bool) {
    match item.strip_suffix('*') {
        Some(text) => (text, true),
        None => (item, false),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env()?,
        )
        .with_writer(std::io::stderr)
        .init();

    let headless = HeadlessToolkit::builder()
        .with_padding(cli.padding)
        .with_char_width(cli.char_width)
        .with_line_height(cli.line_height)
        .build();
    let toolkit = ToolkitHandle::new(headless.clone());

    let axis = if cli.vertical {
        Axis::Vertical
    } else {
        Axis::Horizontal
    };
    let mut container = BoxContainer::new(&toolkit, axis).context("failed to create box")?;
    container.set_padded(cli.padded)?;
    for item in &cli.items {
        let (text, stretchy) = parse_item(item);
        let label = Label::new(&toolkit, text).context("failed to create label")?;
        container.append(label.boxed(), stretchy)?;
    }

    let preferred = headless.preferred_size(container.native_handle())?;
    let size = Size::new(
        cli.width.map_or(preferred.x(), |w| w.ppx()),
        cli.height.map_or(preferred.y(), |h| h.ppx()),
    );
    info!(?preferred, ?size, %axis, "laying out box");
    let rects = headless.layout(container.native_handle(), size)?;
    for (index, ((control, stretchy), rect)) in container.children().zip(&rects).enumerate() {
        let text = control
            .as_any()
            .downcast_ref::<Label>()
            .context("unexpected child type")?
            .text()?;
        println!(
            "{index}\t{text}\t{}\t{rect}",
            if stretchy { "stretchy" } else { "fixed" }
        );
    }

    container.destroy()?;
    ensure!(
        headless.live_widgets() == 0,
        "{} widgets were not destroyed",
        headless.live_widgets()
    );
    Ok(())
}
