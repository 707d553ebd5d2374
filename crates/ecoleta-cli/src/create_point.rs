//! `create-point`: drive the registration page from the command line.
//!
//! Arguments are replayed as the same events a user would produce on the
//! page, in page order: contact fields, UF, city, map click, item clicks.
//! Each `--item` is a click, so passing an id twice deselects it again.

use std::fmt::Write as _;
use std::ops::RangeInclusive;

use clap::Args;
use ecoleta_client::{BackendClient, IbgeClient};
use ecoleta_core::{Coordinate, CreatePointForm, SENTINEL};

use crate::page::geolocation::StaticPosition;
use crate::page::{CreatePointPage, PageEvent};

#[derive(Debug, Args)]
pub struct CreatePointArgs {
    /// Collection point name
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub whatsapp: String,

    /// State abbreviation, e.g. SP
    #[arg(long, default_value = SENTINEL)]
    pub uf: String,

    #[arg(long, default_value = SENTINEL)]
    pub city: String,

    /// Latitude of the point picked on the map
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the point picked on the map
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub lng: f64,

    /// Toggle an item id; repeat for several items
    #[arg(long = "item", value_name = "ID")]
    pub items: Vec<u32>,

    /// Device latitude used to center the map (overrides ECOLETA_DEVICE_POSITION)
    #[arg(
        long,
        allow_negative_numbers = true,
        requires = "device_lng",
        value_parser = parse_latitude
    )]
    pub device_lat: Option<f64>,

    #[arg(
        long,
        allow_negative_numbers = true,
        requires = "device_lat",
        value_parser = parse_longitude
    )]
    pub device_lng: Option<f64>,

    /// Print the payload instead of posting it
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_degrees(s: &str, range: &RangeInclusive<f64>) -> Result<f64, String> {
    let value = s.parse::<f64>().map_err(|e| e.to_string())?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "{value} is outside {}..={}",
            range.start(),
            range.end()
        ))
    }
}

fn parse_latitude(s: &str) -> Result<f64, String> {
    parse_degrees(s, &Coordinate::LATITUDE_RANGE)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    parse_degrees(s, &Coordinate::LONGITUDE_RANGE)
}

impl CreatePointArgs {
    /// The page events these arguments stand for, in page order.
    pub fn events(&self) -> Vec<PageEvent> {
        let mut events = vec![
            PageEvent::InputChanged {
                field: "name".to_owned(),
                value: self.name.clone(),
            },
            PageEvent::InputChanged {
                field: "email".to_owned(),
                value: self.email.clone(),
            },
            PageEvent::InputChanged {
                field: "whatsapp".to_owned(),
                value: self.whatsapp.clone(),
            },
            PageEvent::UfSelected(self.uf.clone()),
            PageEvent::CitySelected(self.city.clone()),
            PageEvent::MapClicked(Coordinate::new(self.lat, self.lng)),
        ];
        events.extend(self.items.iter().copied().map(PageEvent::ItemToggled));
        events
    }

    /// Device position from flags, falling back to `configured`.
    pub fn device_position(&self, configured: Option<Coordinate>) -> Option<Coordinate> {
        match (self.device_lat, self.device_lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => configured,
        }
    }
}

/// Mounts the page, replays `args` and submits.
///
/// # Errors
///
/// Returns an error if an event is rejected by the form or the backend
/// rejects the submission.
pub async fn run(
    args: &CreatePointArgs,
    backend: BackendClient,
    ibge: IbgeClient,
    configured_position: Option<Coordinate>,
) -> anyhow::Result<()> {
    let geolocation = args
        .device_position(configured_position)
        .map_or_else(StaticPosition::denied, StaticPosition::known);

    let mut page = CreatePointPage::new(backend, ibge, geolocation);
    page.mount().await;

    for event in args.events() {
        page.dispatch(event).await?;
    }

    warn_on_unlisted_selection(page.form());
    print!("{}", render_summary(page.form()));

    if args.dry_run {
        let payload = page.form().payload();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        println!("dry run: nothing was submitted");
        return Ok(());
    }

    let outcome = page.submit().await?;
    println!("{}", outcome.notice);
    tracing::info!(route = %outcome.route, "navigating");
    Ok(())
}

/// Warns when the chosen UF or city is not among the loaded options. The
/// submission still goes ahead.
fn warn_on_unlisted_selection(form: &CreatePointForm) {
    let uf = form.geo.selected_uf();
    if uf != SENTINEL && !form.geo.ufs().iter().any(|u| u == uf) {
        tracing::warn!(uf, "selected UF is not in the loaded UF list");
    }
    let city = form.geo.selected_city();
    if city != SENTINEL && !form.geo.cities().iter().any(|c| c == city) {
        tracing::warn!(uf, city, "selected city is not in the loaded city list");
    }
}

/// Plain-text rendering of the page state: contact data, address, map and
/// item grid.
pub fn render_summary(form: &CreatePointForm) -> String {
    let mut out = String::new();
    let data = &form.data;
    let marker = form.map.marker();
    let center = form.map.center();

    let _ = writeln!(out, "Name:      {}", data.name);
    let _ = writeln!(out, "Email:     {}", data.email);
    let _ = writeln!(out, "Whatsapp:  {}", data.whatsapp);
    let _ = writeln!(
        out,
        "Address:   {} / {}",
        form.geo.selected_city(),
        form.geo.selected_uf()
    );
    let _ = writeln!(
        out,
        "Map:       marker {marker}, centered on {center} (zoom {})",
        form.map.zoom()
    );
    let _ = writeln!(out, "Items:");
    for tile in form.item_tiles() {
        let mark = if tile.selected { 'x' } else { ' ' };
        let _ = writeln!(out, "  [{mark}] {:>3}  {}", tile.item.id, tile.item.title);
    }
    out
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ecoleta_client::HttpOptions;
    use ecoleta_core::{Item, PointPayload};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: CreatePointArgs,
    }

    fn parse(argv: &[&str]) -> CreatePointArgs {
        let mut full = vec!["create-point"];
        full.extend_from_slice(argv);
        Harness::try_parse_from(full)
            .expect("expected valid args")
            .args
    }

    #[test]
    fn events_follow_page_order() {
        let args = parse(&[
            "--name", "Jane", "--email", "jane@x.com", "--whatsapp", "123", "--uf", "SP",
            "--city", "São Paulo", "--lat", "-23.5", "--lng", "-46.6", "--item", "1", "--item",
            "3",
        ]);

        assert_eq!(
            args.events(),
            vec![
                PageEvent::InputChanged {
                    field: "name".to_owned(),
                    value: "Jane".to_owned()
                },
                PageEvent::InputChanged {
                    field: "email".to_owned(),
                    value: "jane@x.com".to_owned()
                },
                PageEvent::InputChanged {
                    field: "whatsapp".to_owned(),
                    value: "123".to_owned()
                },
                PageEvent::UfSelected("SP".to_owned()),
                PageEvent::CitySelected("São Paulo".to_owned()),
                PageEvent::MapClicked(Coordinate::new(-23.5, -46.6)),
                PageEvent::ItemToggled(1),
                PageEvent::ItemToggled(3),
            ]
        );
    }

    #[test]
    fn omitted_fields_default_to_empty_and_sentinels() {
        let args = parse(&[]);
        assert_eq!(args.name, "");
        assert_eq!(args.uf, "0");
        assert_eq!(args.city, "0");
        assert!(args.lat.abs() < f64::EPSILON);
        assert!(args.items.is_empty());
        assert!(!args.dry_run);
    }

    #[test]
    fn device_flags_override_configured_position() {
        let args = parse(&["--device-lat", "-22.9", "--device-lng", "-43.2"]);
        assert_eq!(
            args.device_position(Some(Coordinate::new(1.0, 1.0))),
            Some(Coordinate::new(-22.9, -43.2))
        );
    }

    #[test]
    fn configured_position_used_without_flags() {
        let args = parse(&[]);
        assert_eq!(
            args.device_position(Some(Coordinate::new(1.0, 1.0))),
            Some(Coordinate::new(1.0, 1.0))
        );
        assert_eq!(args.device_position(None), None);
    }

    #[test]
    fn device_lat_requires_device_lng() {
        let result = Harness::try_parse_from(["create-point", "--device-lat", "-22.9"]);
        assert!(result.is_err());
    }

    #[test]
    fn device_position_out_of_range_is_rejected() {
        let lat = Harness::try_parse_from([
            "create-point",
            "--device-lat",
            "200",
            "--device-lng",
            "0",
        ]);
        assert!(lat.is_err());

        let lng = Harness::try_parse_from([
            "create-point",
            "--device-lat",
            "0",
            "--device-lng",
            "-180.5",
        ]);
        assert!(lng.is_err());
    }

    #[test]
    fn device_position_accepts_range_bounds() {
        let args = parse(&["--device-lat", "-90", "--device-lng", "180"]);
        assert_eq!(
            args.device_position(None),
            Some(Coordinate::new(-90.0, 180.0))
        );
    }

    fn clients(server: &MockServer) -> (BackendClient, IbgeClient) {
        let options = HttpOptions {
            timeout_secs: 5,
            user_agent: "ecoleta-test/0.1".to_owned(),
            max_retries: 0,
            backoff_base_ms: 0,
        };
        let backend = BackendClient::new(&server.uri(), options.clone()).expect("backend client");
        let ibge = IbgeClient::with_base_url(&format!("{}/ibge", server.uri()), options)
            .expect("ibge client");
        (backend, ibge)
    }

    #[tokio::test]
    async fn dry_run_posts_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/points"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let args = parse(&["--name", "Jane", "--item", "1", "--item", "1", "--dry-run"]);
        let (backend, ibge) = clients(&server);
        run(&args, backend, ibge, None)
            .await
            .expect("dry run should succeed");

        server.verify().await;
    }

    #[tokio::test]
    async fn run_posts_payload_built_from_args() {
        let server = MockServer::start().await;
        let expected = PointPayload {
            name: "Jane".to_owned(),
            email: "jane@x.com".to_owned(),
            whatsapp: "123".to_owned(),
            uf: "0".to_owned(),
            city: "0".to_owned(),
            lat: -23.5,
            long: -46.6,
            // 1 is clicked twice and ends up deselected.
            items: vec![2],
        };
        Mock::given(method("POST"))
            .and(path("/points"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let args = parse(&[
            "--name", "Jane", "--email", "jane@x.com", "--whatsapp", "123", "--lat", "-23.5",
            "--lng", "-46.6", "--item", "1", "--item", "2", "--item", "1",
        ]);
        let (backend, ibge) = clients(&server);
        run(&args, backend, ibge, None)
            .await
            .expect("submission should succeed");

        server.verify().await;
    }

    #[test]
    fn summary_marks_selected_items() {
        let mut form = CreatePointForm::new();
        form.set_items(vec![
            Item {
                id: 1,
                title: "Lâmpadas".to_owned(),
                image_url: "lampadas.svg".to_owned(),
            },
            Item {
                id: 2,
                title: "Pilhas e Baterias".to_owned(),
                image_url: "baterias.svg".to_owned(),
            },
        ]);
        form.toggle_item(2);
        form.data.name = "Jane".to_owned();

        let summary = render_summary(&form);
        assert!(summary.contains("Name:      Jane"));
        assert!(summary.contains("[ ]   1  Lâmpadas"));
        assert!(summary.contains("[x]   2  Pilhas e Baterias"));
        assert!(summary.contains("Address:   0 / 0"));
    }
}
