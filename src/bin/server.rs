use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use log::{error, info};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use footprint::config::{FootprintParams, Weighting};
use footprint::logging::{DEFAULT_LEVEL, setup_logging};
use footprint::render;

const MAX_SCALE: usize = 64;
/// Largest accepted grid size along either axis.
const MAX_GRID: usize = 1024;
/// Largest preview image side in pixels.
const MAX_IMAGE: usize = 4096;

#[derive(Deserialize)]
struct FootprintRequest {
    rx: Option<usize>,
    ry: Option<usize>,
    gx: Option<usize>,
    gy: Option<usize>,
    weighted: Option<bool>,
    // Pixels per cell in the preview image
    scale: Option<usize>,
}

#[derive(Serialize)]
struct FootprintResponse {
    width: usize,
    height: usize,
    rows: Vec<Vec<f64>>,
    data_url: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, msg: impl ToString) -> ApiError {
    (status, Json(ErrorResponse { error: msg.to_string() }))
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, image::ImageError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

/// Rejects grids the preview will not allocate.
fn check_grid_size(params: &FootprintParams) -> Result<(), ApiError> {
    if params.gx > MAX_GRID || params.gy > MAX_GRID {
        info!("rejected request: grid {}x{}", params.gx, params.gy);
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!(
                "grid {}x{} exceeds the {}x{} preview limit",
                params.gx, params.gy, MAX_GRID, MAX_GRID
            ),
        ));
    }
    Ok(())
}

/// Pixels per cell, limited so neither image side exceeds `MAX_IMAGE`.
fn preview_scale(requested: Option<usize>, gx: usize, gy: usize) -> usize {
    let fit = (MAX_IMAGE / gx.max(gy).max(1)).max(1);
    requested.unwrap_or(16).clamp(1, MAX_SCALE).min(fit)
}

async fn footprint_handler(
    Json(req): Json<FootprintRequest>,
) -> Result<Json<FootprintResponse>, ApiError> {
    let defaults = FootprintParams::default();
    let params = FootprintParams::new(
        req.rx.unwrap_or(defaults.rx),
        req.ry.unwrap_or(defaults.ry),
        req.gx.unwrap_or(defaults.gx),
        req.gy.unwrap_or(defaults.gy),
        Weighting::from(req.weighted.unwrap_or(false)),
    );
    check_grid_size(&params)?;
    let scale = preview_scale(req.scale, params.gx, params.gy);

    let response = tokio::task::spawn_blocking(move || {
        let grid = footprint::build(&params).map_err(|e| {
            info!("rejected request: {}", e);
            api_error(StatusCode::BAD_REQUEST, e)
        })?;
        let rgba = render::render_footprint(&grid, scale);
        let data_url = encode_png(&rgba, grid.w * scale, grid.h * scale).map_err(|e| {
            error!("PNG encode failed: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e)
        })?;
        Ok::<_, ApiError>(FootprintResponse {
            width: grid.w,
            height: grid.h,
            rows: grid.rows(),
            data_url,
        })
    })
    .await
    .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))??;

    Ok(Json(response))
}

#[tokio::main]
async fn main() {
    let _logger = setup_logging(DEFAULT_LEVEL);

    let app = Router::new()
        .route("/api/footprint", post(footprint_handler))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("footprint server at http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {}", e);
    }
}
