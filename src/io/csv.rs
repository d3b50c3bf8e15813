use std::io::{self, Write};
use std::path::Path;

use crate::study::{ConfigurationReport, TradeStudy};
use crate::sweep::DeltaVSurface;

/// Write per-stage series for both configurations in CSV format.
///
/// Columns: configuration, stage, mass_ratio, delta_v, cumulative_delta_v,
///          range, propellant_mass, length
pub fn write_stage_series<W: Write>(writer: &mut W, study: &TradeStudy) -> io::Result<()> {
    writeln!(
        writer,
        "configuration,stage,mass_ratio,delta_v,cumulative_delta_v,\
         range,propellant_mass,length"
    )?;
    write_rows(writer, &study.optimized)?;
    write_rows(writer, &study.pop_out)?;
    Ok(())
}

fn write_rows<W: Write>(writer: &mut W, report: &ConfigurationReport) -> io::Result<()> {
    let perf = &report.performance;
    for i in 0..report.mass_ratios.len() {
        writeln!(
            writer,
            "{},{},{:.6},{:.3},{:.3},{:.3},{:.3},{:.3}",
            report.name,
            i + 1,
            report.mass_ratios[i],
            perf.stage_delta_v[i],
            perf.cumulative_delta_v[i],
            perf.cumulative_range[i],
            report.stack.stage_masses[i],
            report.stack.stage_lengths[i],
        )?;
    }
    Ok(())
}

/// Write a delta-v surface as a grid: first row holds stage-2 ratios,
/// each following row starts with its stage-1 ratio.
pub fn write_surface<W: Write>(writer: &mut W, surface: &DeltaVSurface) -> io::Result<()> {
    write!(writer, "stage1\\stage2")?;
    for r in &surface.ratios {
        write!(writer, ",{:.2}", r)?;
    }
    writeln!(writer)?;

    for (i, r1) in surface.ratios.iter().enumerate() {
        write!(writer, "{:.2}", r1)?;
        for dv in surface.values.row(i).iter() {
            write!(writer, ",{:.3}", dv)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn write_stage_series_file(path: impl AsRef<Path>, study: &TradeStudy) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_stage_series(&mut file, study)
}

pub fn write_surface_file(path: impl AsRef<Path>, surface: &DeltaVSurface) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_surface(&mut file, surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConstants;
    use approx::assert_relative_eq;
    use crate::performance::stage_delta_v;
    use crate::sweep::{reference_surfaces, staged_isp_constants, BOOSTER_ISP, BOOSTER_RATIO, STAGE3_RATIO};
    use crate::vehicle::presets;

    #[test]
    fn stage_series_has_header_and_rows() {
        let study = TradeStudy::run(
            &presets::optimized(),
            &presets::pop_out(),
            &EngineConstants::default(),
        )
        .unwrap();

        let mut buf = Vec::new();
        write_stage_series(&mut buf, &study).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("configuration,stage,"));
        assert_eq!(lines.len(), 7); // header + 3 stages x 2 configurations
        assert!(lines[1].starts_with("Optimized Rocket,1,0.900000,258.397,"));
        assert!(lines[4].starts_with("Pop-Out Booster,1,"));
    }

    #[test]
    fn surface_is_square_grid() {
        let surface = DeltaVSurface::compute(&staged_isp_constants(), STAGE3_RATIO).unwrap();
        let mut buf = Vec::new();
        write_surface(&mut buf, &surface).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 22);
        assert!(lines[0].starts_with("stage1\\stage2,0.80,0.81"));
        assert!(lines[1].starts_with("0.80,"));
        assert!(lines.iter().all(|l| l.split(',').count() == 22));
    }

    fn parse_grid(output: &str) -> Vec<Vec<f64>> {
        output
            .lines()
            .skip(1)
            .map(|l| l.split(',').skip(1).map(|v| v.parse().unwrap()).collect())
            .collect()
    }

    #[test]
    fn booster_grid_is_plain_grid_plus_boost() {
        let (plain, boosted) = reference_surfaces().unwrap();
        let boost = stage_delta_v(BOOSTER_RATIO, BOOSTER_ISP * staged_isp_constants().gravity).unwrap();

        let (mut a, mut b) = (Vec::new(), Vec::new());
        write_surface(&mut a, &plain).unwrap();
        write_surface(&mut b, &boosted).unwrap();
        let a = String::from_utf8(a).unwrap();
        let b = String::from_utf8(b).unwrap();
        assert_eq!(a.lines().next(), b.lines().next());

        let (plain_grid, boosted_grid) = (parse_grid(&a), parse_grid(&b));
        assert_eq!(boosted_grid.len(), 21);
        for (p_row, b_row) in plain_grid.iter().zip(&boosted_grid) {
            for (p, b) in p_row.iter().zip(b_row) {
                assert_relative_eq!(b - p, boost, epsilon = 1e-6);
            }
        }
    }
}
