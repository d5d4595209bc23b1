use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use plotpin_api::PlotpinClient;
use plotpin_collector::{CaptureSession, MarkerHandle, MarkerRenderer, Projection, SubmissionSink};
use plotpin_types::{MAX_POINTS, MapCoordinate, ScreenPosition};
use tracing::info;

#[derive(Parser)]
#[command(name = "plotpin", about = "Capture map points and submit them as a polygon", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Capture points and submit them to the polygon endpoint
    Submit {
        /// Owner username attached to the submission
        #[arg(long)]
        owner: String,
        /// Contact phone number attached to the submission
        #[arg(long)]
        contact: String,
        /// A point as "lat,lon"; repeat up to five times
        #[arg(long = "point", value_name = "LAT,LON")]
        points: Vec<String>,
    },
    /// Fetch previously submitted polygons
    List {
        /// Print raw JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Submit { owner, contact, points } => run_submit(&owner, &contact, &points).await,
        Command::List { json } => run_list(json).await,
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn run_submit(owner: &str, contact: &str, raw_points: &[String]) -> Result<()> {
    if raw_points.is_empty() {
        bail!("at least one --point is required");
    }
    if raw_points.len() > MAX_POINTS {
        bail!("at most {} points may be submitted; got {}", MAX_POINTS, raw_points.len());
    }

    let coordinates = raw_points
        .iter()
        .map(|raw| parse_point(raw).with_context(|| format!("invalid --point '{raw}'")))
        .collect::<Result<Vec<_>>>()?;

    let mut session = CaptureSession::new(LoggingRenderer::default(), MapUnitProjection);
    session.start_capture();
    for coordinate in coordinates {
        session.capture(coordinate);
    }

    let submission = session.finalize(owner, contact).context("submission rejected")?;

    let client = PlotpinClient::from_env().context("configure endpoint client")?;
    let outcome = client.submit(&submission).await;
    let failure = outcome.as_ref().err().map(|e| e.to_string());
    session.apply_submit_outcome(outcome);

    match failure {
        None => {
            println!(
                "Submitted {} point(s) for {} ({})",
                submission.points.len(),
                submission.owner,
                submission.contact
            );
            Ok(())
        }
        Some(message) => bail!("submission failed: {message}"),
    }
}

async fn run_list(as_json: bool) -> Result<()> {
    let client = PlotpinClient::from_env().context("configure endpoint client")?;
    let records = client.fetch_all().await.context("fetch polygons")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No polygons submitted yet");
        return Ok(());
    }
    for record in &records {
        let vertices = record
            .coordinates()
            .iter()
            .map(|c| format!("({}, {})", c.latitude, c.longitude))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{} ({}): {}", record.owner, record.contact, vertices);
    }
    Ok(())
}

/// Parses a "lat,lon" argument into a map coordinate.
fn parse_point(raw: &str) -> Result<MapCoordinate> {
    let (lat, lon) = raw.split_once(',').context("expected 'lat,lon'")?;
    let latitude: f64 = lat.trim().parse().context("latitude is not a number")?;
    let longitude: f64 = lon.trim().parse().context("longitude is not a number")?;
    Ok(MapCoordinate::new(longitude, latitude))
}

/// Marker renderer for a headless session; markers become log lines.
#[derive(Debug, Default)]
struct LoggingRenderer {
    next_handle: u64,
}

impl MarkerRenderer for LoggingRenderer {
    fn add_marker(&mut self, coordinate: MapCoordinate) -> MarkerHandle {
        self.next_handle += 1;
        info!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "marker {}",
            self.next_handle
        );
        MarkerHandle(self.next_handle)
    }

    fn remove_all(&mut self) {
        info!("markers cleared");
    }
}

/// CLI input is already in map projection units, so screen positions map 1:1.
struct MapUnitProjection;

impl Projection for MapUnitProjection {
    fn to_map(&self, position: ScreenPosition) -> MapCoordinate {
        MapCoordinate::new(position.x, position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lat_lon_into_coordinate() {
        let coordinate = parse_point("39.93,32.89").expect("parse point");
        assert_eq!(coordinate.latitude, 39.93);
        assert_eq!(coordinate.longitude, 32.89);
    }

    #[test]
    fn tolerates_whitespace_around_axes() {
        let coordinate = parse_point(" 1.5 , -2.25 ").expect("parse point");
        assert_eq!(coordinate.latitude, 1.5);
        assert_eq!(coordinate.longitude, -2.25);
    }

    #[test]
    fn rejects_malformed_points() {
        assert!(parse_point("39.93").is_err());
        assert!(parse_point("a,b").is_err());
        assert!(parse_point("").is_err());
    }
}
