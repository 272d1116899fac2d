use crate::core::prompt::{build_route_prompt, route_response_schema, PHARMACY_ADDRESS};
use crate::domain::model::{DeliveryStop, OptimizedStop};
use crate::domain::ports::RoutePlanner;
use crate::utils::error::{OpsError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};

impl Validate for DeliveryStop {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("patient_name", &self.patient_name)?;
        validate_non_empty_string("address", &self.address)?;
        Ok(())
    }
}

/// Turns an unordered set of delivery stops into a visiting order by asking
/// the injected planner once per call. Stateless; each call is independent.
pub struct RouteOptimizer<P: RoutePlanner> {
    planner: P,
    origin: String,
}

impl<P: RoutePlanner> RouteOptimizer<P> {
    pub fn new(planner: P) -> Self {
        Self {
            planner,
            origin: PHARMACY_ADDRESS.to_string(),
        }
    }

    pub async fn optimize_route(&self, stops: &[DeliveryStop]) -> Result<Vec<OptimizedStop>> {
        if stops.is_empty() {
            return Ok(Vec::new());
        }
        for stop in stops {
            stop.validate()?;
        }

        let prompt = build_route_prompt(&self.origin, stops);
        let schema = route_response_schema();

        tracing::debug!("Requesting optimized route for {} stops", stops.len());
        let body = self.planner.plan_route(&prompt, &schema).await?;

        let mut route = parse_route_response(&body)?;
        if route.len() != stops.len() {
            tracing::warn!(
                "Route service returned {} stops for {} requested; keeping the response as-is",
                route.len(),
                stops.len()
            );
        }

        // The service is asked to return the array already ordered; sort
        // anyway and renumber so ranks are dense and unique, with duplicate
        // ranks resolved by response order.
        route.sort_by_key(|stop| stop.order);
        for (index, stop) in route.iter_mut().enumerate() {
            stop.order = index as u32 + 1;
        }

        Ok(route)
    }
}

fn parse_route_response(body: &str) -> Result<Vec<OptimizedStop>> {
    let route: Vec<OptimizedStop> =
        serde_json::from_str(body.trim()).map_err(|e| OpsError::SchemaError {
            details: format!("response is not a valid route array: {}", e),
        })?;

    for stop in &route {
        if stop.order == 0 {
            return Err(OpsError::SchemaError {
                details: format!(
                    "optimized_order must start at 1, got 0 for {}",
                    stop.customer_name
                ),
            });
        }
    }

    Ok(route)
}
