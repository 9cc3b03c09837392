mod app;
mod color;
mod data;
mod render;
mod settings;

use settings::PlotSettings;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .format_timestamp(None)
        .format_target(false)
        .parse_env(env_logger::Env::default().filter_or("XIC_PLOT_LOG", "warn"))
        .init();

    app::run(std::io::stdin().lock(), &PlotSettings::default())?;
    Ok(())
}
