use crate::domain::model::{ApiRequest, Coordinate, ParamValue, Params, ResponseKeys};
use crate::domain::ports::ApiInvoker;
use crate::utils::error::{Result, VenuesError};
use crate::utils::validation::is_blank;
use std::sync::Arc;
use tracing::Instrument;

const PHOTO_GROUP_DEFAULT: &str = "checkin";

/// Client for the `venues` resource family.
///
/// Each operation checks its required arguments, shapes an [`ApiRequest`] and
/// hands it to the injected [`ApiInvoker`] exactly once. A failed check
/// returns [`VenuesError::ValidationError`] without touching the invoker.
#[derive(Clone)]
pub struct VenuesClient {
    invoker: Arc<dyn ApiInvoker>,
    span: tracing::Span,
}

impl VenuesClient {
    pub fn new(invoker: Arc<dyn ApiInvoker>) -> Self {
        Self::with_span(invoker, tracing::info_span!("venues"))
    }

    /// Uses `span` as the logging scope for every operation.
    pub fn with_span(invoker: Arc<dyn ApiInvoker>, span: tracing::Span) -> Self {
        Self { invoker, span }
    }

    pub async fn get_categories(
        &self,
        params: Option<Params>,
        access_token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.enter("Venues.getCategories");
        self.dispatch(
            vec!["venues".to_string(), "categories".to_string()],
            access_token,
            ResponseKeys::single("categories"),
            Some(params.unwrap_or_default()),
        )
        .await
    }

    pub async fn explore(
        &self,
        lat: Option<Coordinate>,
        lng: Option<Coordinate>,
        params: Option<Params>,
        access_token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.enter("Venues.explore");
        let params = self.located_params("Venues.explore", lat, lng, params)?;
        self.dispatch(
            vec!["venues".to_string(), "explore".to_string()],
            access_token,
            ResponseKeys::many(&["keywords", "groups", "warning"]),
            Some(params),
        )
        .await
    }

    pub async fn search(
        &self,
        lat: Option<Coordinate>,
        lng: Option<Coordinate>,
        params: Option<Params>,
        access_token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.enter("Venues.search");
        let params = self.located_params("Venues.search", lat, lng, params)?;
        self.dispatch(
            vec!["venues".to_string(), "search".to_string()],
            access_token,
            ResponseKeys::single("groups"),
            Some(params),
        )
        .await
    }

    pub async fn get_trending(
        &self,
        lat: Option<Coordinate>,
        lng: Option<Coordinate>,
        params: Option<Params>,
        access_token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.enter("Venues.getTrending");
        let params = self.located_params("Venues.getTrending", lat, lng, params)?;
        self.dispatch(
            vec!["venues".to_string(), "trending".to_string()],
            access_token,
            ResponseKeys::single("venues"),
            Some(params),
        )
        .await
    }

    /// The venue lookup forwards no parameter bag at all.
    pub async fn get_venue(
        &self,
        venue_id: Option<&str>,
        access_token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.enter("Venues.getVenue");
        let venue_id = self.require("Venues.getVenue", "venueId", venue_id)?;
        self.dispatch(
            vec!["venues".to_string(), venue_id.to_string()],
            access_token,
            ResponseKeys::single("venue"),
            None,
        )
        .await
    }

    pub async fn get_venue_aspect(
        &self,
        venue_id: Option<&str>,
        aspect: Option<&str>,
        params: Option<Params>,
        access_token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.enter("Venues.getVenueAspect");
        let venue_id = self.require("Venues.getVenueAspect", "venueId", venue_id)?;
        let aspect = self.require("Venues.getVenueAspect", "aspect", aspect)?;
        self.dispatch(
            vec![
                "venues".to_string(),
                venue_id.to_string(),
                aspect.to_string(),
            ],
            access_token,
            ResponseKeys::single(aspect),
            Some(params.unwrap_or_default()),
        )
        .await
    }

    pub async fn get_here_now(
        &self,
        venue_id: Option<&str>,
        params: Option<Params>,
        access_token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.enter("Venues.getHereNow");
        let venue_id = self.require("Venues.getHereNow", "venueId", venue_id)?;
        self.dispatch(
            vec![
                "venues".to_string(),
                venue_id.to_string(),
                "herenow".to_string(),
            ],
            access_token,
            ResponseKeys::single("hereNow"),
            Some(params.unwrap_or_default()),
        )
        .await
    }

    pub async fn get_tips(
        &self,
        venue_id: Option<&str>,
        params: Option<Params>,
        access_token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.enter("Venues.getTips");
        let venue_id = self.require("Venues.getTips", "venueId", venue_id)?;
        self.get_venue_aspect(Some(venue_id), Some("tips"), params, access_token)
            .await
    }

    /// Photos are grouped by `group`, which defaults to `checkin`.
    pub async fn get_photos(
        &self,
        venue_id: Option<&str>,
        group: Option<&str>,
        params: Option<Params>,
        access_token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.enter("Venues.getPhotos");
        let venue_id = self.require("Venues.getPhotos", "venueId", venue_id)?;
        let mut params = params.unwrap_or_default();
        let group = group
            .filter(|g| !is_blank(Some(g)))
            .unwrap_or(PHOTO_GROUP_DEFAULT);
        params.insert("group".to_string(), ParamValue::from(group));
        self.get_venue_aspect(Some(venue_id), Some("photos"), Some(params), access_token)
            .await
    }

    pub async fn get_links(
        &self,
        venue_id: Option<&str>,
        params: Option<Params>,
        access_token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.enter("Venues.getLinks");
        let venue_id = self.require("Venues.getLinks", "venueId", venue_id)?;
        self.get_venue_aspect(Some(venue_id), Some("links"), params, access_token)
            .await
    }

    fn enter(&self, operation: &str) {
        self.span.in_scope(|| tracing::debug!("ENTERING: {}", operation));
    }

    fn reject(&self, message: String) -> VenuesError {
        self.span.in_scope(|| tracing::error!("{}", message));
        VenuesError::validation(message)
    }

    fn require<'a>(&self, operation: &str, field: &str, value: Option<&'a str>) -> Result<&'a str> {
        match value {
            Some(v) if !is_blank(Some(v)) => Ok(v),
            _ => Err(self.reject(format!("{}: {} is required.", operation, field))),
        }
    }

    /// Checks latitude and longitude together and adds the `ll` parameter.
    fn located_params(
        &self,
        operation: &str,
        lat: Option<Coordinate>,
        lng: Option<Coordinate>,
        params: Option<Params>,
    ) -> Result<Params> {
        match (lat, lng) {
            (Some(lat), Some(lng)) if !lat.is_missing() && !lng.is_missing() => {
                let mut params = params.unwrap_or_default();
                params.insert(
                    "ll".to_string(),
                    ParamValue::Text(Coordinate::pair(&lat, &lng)),
                );
                Ok(params)
            }
            _ => Err(self.reject(format!("{}: lat and lng are both required.", operation))),
        }
    }

    async fn dispatch(
        &self,
        segments: Vec<String>,
        access_token: Option<&str>,
        response_keys: ResponseKeys,
        params: Option<Params>,
    ) -> Result<serde_json::Value> {
        let request = ApiRequest {
            segments,
            access_token: access_token.map(str::to_string),
            response_keys,
            params,
        };
        self.invoker.call_api(request).instrument(self.span.clone()).await
    }
}
