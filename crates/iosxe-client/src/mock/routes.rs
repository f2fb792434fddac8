//! Static route operations for MockDeviceClient

use super::{MockDeviceClient, lock, response, restconf_error};
use crate::error::DeviceError;
use crate::models::*;

pub async fn get_static_routes(client: &MockDeviceClient) -> Result<Vec<StaticRoute>, DeviceError> {
    client.record("GET", "/ip/route");
    client.check_read()?;
    Ok(lock(&client.routes).clone())
}

pub async fn add_static_route(client: &MockDeviceClient, destination: &str, mask: &str, next_hop: &str) -> Result<DeviceResponse, DeviceError> {
    client.record("POST", "/ip/route/");

    let route = StaticRoute::new(destination, mask, next_hop);
    let mut routes = lock(&client.routes);
    if routes.iter().any(|existing| existing.key() == route.key()) {
        return Ok(response(
            409,
            restconf_error("data-exists", &format!("object already exists: {}", route.key())),
        ));
    }

    routes.push(route);
    Ok(response(201, ""))
}

pub async fn delete_static_route(client: &MockDeviceClient, destination: &str, mask: &str) -> Result<DeviceResponse, DeviceError> {
    let key = route_key(destination, mask);
    client.record("DELETE", format!("/ip/route/{}={}", FORWARDING_LIST_KEY, key));

    let mut routes = lock(&client.routes);
    let before = routes.len();
    routes.retain(|route| route.key() != key);

    if routes.len() == before {
        return Ok(response(404, restconf_error("invalid-value", "uri keypath not found")));
    }
    Ok(response(204, ""))
}
