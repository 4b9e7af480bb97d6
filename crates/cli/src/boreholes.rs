//! Borehole tables: CSV → `BoreholeSample`s via polars.
//!
//! Columns: `id,x,y` required; `coalThickness,gasContent,rockHardness,
//! groundWater` optional scalars (missing cells take the library defaults);
//! `seam,depth,roofRock,floorRock` optional seam intersection. Rows sharing
//! an `id` are one borehole with several seams, in file order.

use anyhow::{Context, Result};
use minelayout::geology::{BoreholeSample, CoalSeamInfo, MAIN_SEAM_NAME};
use polars::prelude::*;
use std::path::Path;

fn f64_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<f64>>>> {
    let Ok(col) = df.column(name) else {
        return Ok(None);
    };
    let cast = col
        .cast(&DataType::Float64)
        .with_context(|| format!("column {name} is not numeric"))?;
    Ok(Some(cast.f64()?.into_iter().collect()))
}

fn str_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<String>>>> {
    let Ok(col) = df.column(name) else {
        return Ok(None);
    };
    let cast = col.cast(&DataType::String)?;
    Ok(Some(
        cast.str()?
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()))
            .collect(),
    ))
}

fn cell<T: Clone>(col: &Option<Vec<Option<T>>>, row: usize) -> Option<T> {
    col.as_ref().and_then(|c| c.get(row).cloned().flatten())
}

pub fn load_boreholes(path: &Path) -> Result<Vec<BoreholeSample>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening borehole table {}", path.display()))?
        .collect()
        .with_context(|| format!("reading borehole table {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), "borehole table loaded");

    let ids = str_column(&df, "id")?.context("borehole table needs an `id` column")?;
    let xs = f64_column(&df, "x")?.context("borehole table needs an `x` column")?;
    let ys = f64_column(&df, "y")?.context("borehole table needs a `y` column")?;
    let thickness = f64_column(&df, "coalThickness")?;
    let gas = f64_column(&df, "gasContent")?;
    let hardness = f64_column(&df, "rockHardness")?;
    let water = f64_column(&df, "groundWater")?;
    let seam = str_column(&df, "seam")?;
    let depth = f64_column(&df, "depth")?;
    let roof = str_column(&df, "roofRock")?;
    let floor = str_column(&df, "floorRock")?;

    let mut out: Vec<BoreholeSample> = Vec::new();
    for row in 0..df.height() {
        let (Some(id), Some(x), Some(y)) = (ids[row].clone(), xs[row], ys[row]) else {
            tracing::warn!(row, "borehole row without id or coordinates skipped");
            continue;
        };
        let pos = match out.iter().position(|b| b.id == id) {
            Some(i) => i,
            None => {
                let mut b = BoreholeSample::new(id, x, y);
                if let Some(v) = cell(&thickness, row) {
                    b.coal_thickness = v;
                }
                if let Some(v) = cell(&gas, row) {
                    b.gas_content = v;
                }
                if let Some(v) = cell(&hardness, row) {
                    b.rock_hardness = v;
                }
                if let Some(v) = cell(&water, row) {
                    b.ground_water = v;
                }
                out.push(b);
                out.len() - 1
            }
        };
        if let Some(d) = cell(&depth, row) {
            let b = &mut out[pos];
            let thick = cell(&thickness, row).unwrap_or(b.coal_thickness);
            b.seams.push(CoalSeamInfo {
                name: cell(&seam, row).unwrap_or_else(|| MAIN_SEAM_NAME.to_string()),
                thickness: thick,
                depth: d,
                roof_rock: cell(&roof, row).unwrap_or_default(),
                floor_rock: cell(&floor, row).unwrap_or_default(),
                roof_thickness: 0.0,
                floor_thickness: 0.0,
            });
        }
    }
    tracing::info!(boreholes = out.len(), "boreholes parsed");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn scalar_columns_default_when_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("holes.csv");
        fs::write(&path, "id,x,y,coalThickness\nZK1,10.5,20,2.5\nZK2,30,40,\n").unwrap();
        let holes = load_boreholes(&path).unwrap();
        assert_eq!(holes.len(), 2);
        assert_eq!(holes[0].id, "ZK1");
        assert_eq!(holes[0].x, 10.5);
        assert_eq!(holes[0].coal_thickness, 2.5);
        assert_eq!(holes[1].coal_thickness, 3.0);
        assert_eq!(holes[1].gas_content, 2.0);
        assert!(holes[0].seams.is_empty());
    }

    #[test]
    fn rows_with_depth_become_seams() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seams.csv");
        fs::write(
            &path,
            "id,x,y,seam,coalThickness,depth,roofRock,floorRock\n\
             ZK1,0,0,3煤,2.1,120,砂岩,泥岩\n\
             ZK1,0,0,5煤,1.2,180,粉砂岩,泥岩\n\
             ZK2,100,0,3煤,2.4,125,砂岩,泥岩\n",
        )
        .unwrap();
        let holes = load_boreholes(&path).unwrap();
        assert_eq!(holes.len(), 2);
        assert_eq!(holes[0].seams.len(), 2);
        assert_eq!(holes[0].seams[1].name, "5煤");
        assert_eq!(holes[0].seams[1].depth, 180.0);
        assert_eq!(holes[1].seams[0].roof_rock, "砂岩");
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "name,x,y\nA,1,2\n").unwrap();
        assert!(load_boreholes(&path).is_err());
    }
}
