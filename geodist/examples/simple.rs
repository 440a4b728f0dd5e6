use geodist::geo::{DistanceMethod, Ellipsoid, GeographicPoint, VincentyInverse};

fn main() -> anyhow::Result<()> {
    let from: GeographicPoint = "23.205402, 120.335066".parse()?;
    let to: GeographicPoint = "23.202188, 120.339733".parse()?;

    let solution = VincentyInverse::default().solve(from, to, &Ellipsoid::WGS84);
    let distance = solution.into_result()?;

    println!("{from} -> {to}");
    println!("  vincenty:  {distance:.3}m in {} iterations", solution.iterations);
    if let (Some(initial), Some(last)) = (
        solution.initial_bearing_degrees(),
        solution.final_bearing_degrees(),
    ) {
        println!("  bearings:  {initial:.4}º -> {last:.4}º");
    }

    let method: DistanceMethod = "haversine".parse()?;
    println!("  {method}: {:.3}m", method.distance(from, to)?);

    Ok(())
}
