//! TOML configuration deserialisation for solver jobs.

use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub cavity: CavityConfig,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Cavity geometry parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct CavityConfig {
    /// Boundary radius r0.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Refractive index inside the boundary.
    pub n_core: f64,
    /// Refractive index outside the boundary.
    #[serde(default = "default_n_outside")]
    pub n_outside: f64,
}

fn default_radius() -> f64 {
    1.0
}
fn default_n_outside() -> f64 {
    1.0
}

/// Solver parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Wavenumber k of the incident field.
    #[serde(default = "default_wavenumber")]
    pub wavenumber: f64,
    /// Maximum angular order Mmax.
    #[serde(default = "default_max_order")]
    pub max_order: i32,
    /// Target point count for the `run` command.
    #[serde(default = "default_points")]
    pub points: usize,
    /// Mesh sequence for the `converge` command.
    #[serde(default = "default_mesh_sizes")]
    pub mesh_sizes: Vec<usize>,
    /// Relative-residual tolerance of the dense solve.
    #[serde(default = "default_residual_tolerance")]
    pub residual_tolerance: f64,
}

fn default_wavenumber() -> f64 {
    1.0
}
fn default_max_order() -> i32 {
    1
}
fn default_points() -> usize {
    500
}
fn default_mesh_sizes() -> Vec<usize> {
    vec![25, 50, 100, 200, 300, 500, 1000, 2000]
}
fn default_residual_tolerance() -> f64 {
    1e-8
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save the mesh as JSON (default: true).
    #[serde(default = "default_true")]
    pub save_mesh: bool,
    /// Whether to save per-order induced-field magnitudes as CSV
    /// (default: false; one file per angular order).
    #[serde(default)]
    pub save_fields: bool,
    /// Whether to save the scattering matrix as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_matrix: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_mesh: true,
            save_fields: false,
            save_matrix: true,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: JobConfig = toml::from_str(
            r#"
            [cavity]
            n_core = 2.0

            [simulation]
            "#,
        )
        .unwrap();

        assert_eq!(config.cavity.radius, 1.0);
        assert_eq!(config.cavity.n_outside, 1.0);
        assert_eq!(config.simulation.wavenumber, 1.0);
        assert_eq!(config.simulation.max_order, 1);
        assert_eq!(config.simulation.points, 500);
        assert_eq!(config.simulation.mesh_sizes.len(), 8);
        assert!(config.output.save_mesh);
        assert!(!config.output.save_fields);
    }

    #[test]
    fn test_full_config() {
        let config: JobConfig = toml::from_str(
            r#"
            [cavity]
            radius = 1.5
            n_core = 3.2
            n_outside = 1.2

            [simulation]
            wavenumber = 2.0
            max_order = 4
            points = 1000
            mesh_sizes = [100, 400]
            residual_tolerance = 1e-10

            [output]
            directory = "./results"
            save_fields = true
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.max_order, 4);
        assert_eq!(config.simulation.mesh_sizes, vec![100, 400]);
        assert_eq!(config.output.directory, "./results");
        assert!(config.output.save_fields);
    }
}
