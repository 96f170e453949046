use anyhow::Result;
use geopoints::distance_km;
use serde::Serialize;

#[derive(Serialize)]
struct DistanceOutput {
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    distance_km: f64,
}

pub fn run(lat1: f64, lon1: f64, lat2: f64, lon2: f64, json: bool) -> Result<()> {
    println!("{}", render(lat1, lon1, lat2, lon2, json)?);
    Ok(())
}

fn render(lat1: f64, lon1: f64, lat2: f64, lon2: f64, json: bool) -> Result<String> {
    let distance_km = distance_km(lat1, lon1, lat2, lon2);

    if json {
        let output = DistanceOutput {
            lat1,
            lon1,
            lat2,
            lon2,
            distance_km,
        };
        Ok(serde_json::to_string(&output)?)
    } else {
        Ok(format!("{:.3}", distance_km))
    }
}
