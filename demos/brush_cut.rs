//! Builds a brush from faces, trims it and drags a vertex, logging each step.
//!
//! Usage:
//! ```text
//! cargo run --example brush_cut
//! RUST_LOG=brushgeo=debug cargo run --example brush_cut
//! ```

use brushgeo::geometry::{Face, FaceAttributes, Plane};
use brushgeo::math::{Aabb, Axis, Point3, Ray, Vector3};
use brushgeo::operations::clip::Cut;
use brushgeo::operations::creation::MakeBrush;
use brushgeo::operations::modification::TranslateVertex;
use brushgeo::operations::query::{ContainsPoint, IsValid, Pick};
use brushgeo::operations::transform::{Mirror, Rotate90, RotationDirection};
use brushgeo::topology::Polyhedron;
use brushgeo::BrushGeoError;

fn face(origin: Point3, normal: Vector3, texture: &str) -> Result<Face, BrushGeoError> {
    Ok(Face::new(
        Plane::from_normal(origin, normal)?,
        FaceAttributes::with_texture(texture),
    ))
}

fn report(label: &str, poly: &Polyhedron) {
    tracing::info!(
        vertices = poly.vertex_count(),
        edges = poly.edge_count(),
        sides = poly.side_count(),
        min = ?poly.bounds().min,
        max = ?poly.bounds().max,
        valid = IsValid::new().execute(poly),
        "{label}"
    );
}

fn main() -> Result<(), BrushGeoError> {
    // Default: WARN for everything, INFO for brushgeo.
    // Override with RUST_LOG env var (e.g. RUST_LOG=brushgeo=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("brush_cut=info".parse().unwrap_or_default())
        .add_directive("brushgeo=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let world = Aabb::new(
        Point3::new(-4096.0, -4096.0, -4096.0),
        Point3::new(4096.0, 4096.0, 4096.0),
    );
    let faces = vec![
        face(Point3::new(0.0, 0.0, 0.0), -Vector3::x(), "wall")?,
        face(Point3::new(64.0, 0.0, 0.0), Vector3::x(), "wall")?,
        face(Point3::new(0.0, 0.0, 0.0), -Vector3::y(), "wall")?,
        face(Point3::new(0.0, 64.0, 0.0), Vector3::y(), "wall")?,
        face(Point3::new(0.0, 0.0, 0.0), -Vector3::z(), "floor")?,
        face(Point3::new(0.0, 0.0, 32.0), Vector3::z(), "ceiling")?,
    ];
    let mut brush = MakeBrush::new(world, faces).execute()?.polyhedron;
    report("built brush", &brush);

    let bevel = face(Point3::new(64.0, 32.0, 0.0), Vector3::new(1.0, 1.0, 0.0), "bevel")?;
    let outcome = Cut::new(bevel).execute(&mut brush);
    tracing::info!(result = ?outcome.result, dropped = outcome.dropped_faces.len(), "bevel cut");
    report("after bevel", &brush);

    Rotate90::new(Axis::Z, RotationDirection::Clockwise, Point3::new(32.0, 32.0, 0.0)).execute(&mut brush);
    Mirror::new(Axis::X, Point3::new(32.0, 32.0, 0.0)).execute(&mut brush);
    report("after rotate and mirror", &brush);

    let corner = brush.vertices().find(|(_, v)| v.position.z > 16.0).map(|(id, _)| id);
    if let Some(corner) = corner {
        let moved = TranslateVertex::new(corner, Vector3::new(0.0, 0.0, 16.0)).execute(&mut brush)?;
        tracing::info!(
            new_faces = moved.new_faces.len(),
            removed_faces = moved.removed_faces.len(),
            "dragged a top vertex"
        );
        report("after vertex drag", &brush);
    }

    if let Some(ray) = Ray::new(Point3::new(32.0, 32.0, 500.0), -Vector3::z()) {
        if let Some(hit) = Pick::new(ray).execute(&brush) {
            tracing::info!(distance = hit.distance, point = ?hit.point, "picked side from above");
        }
    }
    tracing::info!(
        contains_center = ContainsPoint::new(*brush.center()).execute(&brush),
        "done"
    );
    Ok(())
}
