use std::io::Write;

use crate::app::{AppContext, Result};
use crate::config::load_sources;
use crate::domain::ComicSeries;
use crate::render::{to_legacy_json, write_outputs, PageRenderer};
use crate::server;

async fn collect(ctx: &AppContext) -> Result<Vec<ComicSeries>> {
    let sources = load_sources(&ctx.config.feeds)?;
    let (series, summary) = ctx.aggregate(sources).await;

    if summary.series < summary.sources {
        println!(
            "Collected {} of {} feeds ({} failed to fetch, {} failed to parse, {} empty)",
            summary.series,
            summary.sources,
            summary.fetch_failed,
            summary.decode_failed,
            summary.empty
        );
    } else {
        println!("Collected {} feeds", summary.series);
    }

    Ok(series)
}

/// Fetch everything and write the page. The template is loaded first so a
/// broken template fails before any network traffic.
async fn write_site(ctx: &AppContext) -> Result<()> {
    let renderer = PageRenderer::from_file(&ctx.config.output.template)?;
    let series = collect(ctx).await?;
    write_outputs(&renderer, &ctx.config.output, &series)?;
    Ok(())
}

pub async fn build(ctx: &AppContext, open_browser: bool) -> Result<()> {
    write_site(ctx).await?;

    let page = ctx.config.output.html_path();
    println!("Wrote {}", page.display());

    if open_browser {
        if let Err(e) = open::that(&page) {
            tracing::warn!(path = %page.display(), error = %e, "Failed to open browser");
        }
    }
    Ok(())
}

pub async fn serve(ctx: &AppContext) -> Result<()> {
    write_site(ctx).await?;
    server::serve(&ctx.config.output.dir, ctx.config.server.port).await
}

pub async fn print_json(ctx: &AppContext) -> Result<()> {
    let series = collect(ctx).await?;
    let json = to_legacy_json(&series)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&json)?;
    writeln!(stdout)?;
    Ok(())
}
