use super::CoverageInputs;
use crate::{
    config::{CoverageConfiguration, ModeFailurePolicy},
    model::{
        coverage::{CoverageRecord, CoverageResult, RunSummary, SUMMARY_FILENAME},
        distance::DistanceThreshold,
        geometry::read_boundary,
        layer::{write_layer, CellFingerprint, CoverageCache, InputDigests, LayerKey, LayerKind},
        origin::OriginAssignment,
        provider::{read_providers, ProviderPoint},
        service_area::ServiceAreaEngine,
        CoverageError,
    },
};
use foodshed_osm::model::{
    osm::{graph::TravelGraph, OsmError},
    TravelMode,
};
use geo::MultiPolygon;

/// the batch driver: builds one network per mode, snaps providers to it, and
/// computes, writes and summarizes coverage for every distance. layers and
/// the summary are written only from the calling thread.
pub struct CoverageRun {
    inputs: CoverageInputs,
    config: CoverageConfiguration,
}

/// state shared by every cell of a run
struct RunContext<'a> {
    boundary: &'a MultiPolygon<f64>,
    providers: &'a [ProviderPoint],
    distances: &'a [DistanceThreshold],
    digests: &'a InputDigests,
    cache: &'a CoverageCache,
}

impl CoverageRun {
    pub fn new(
        inputs: CoverageInputs,
        config: CoverageConfiguration,
    ) -> Result<CoverageRun, CoverageError> {
        config.validate()?;
        Ok(CoverageRun { inputs, config })
    }

    /// runs every configured mode against the configured network source
    pub fn run(&self) -> Result<RunSummary, CoverageError> {
        self.run_with(|mode, boundary| {
            self.inputs
                .network
                .import(mode, boundary, &self.config.graph)
        })
    }

    /// runs every configured mode, obtaining each mode's network from
    /// `build_graph`.
    pub fn run_with<F>(&self, build_graph: F) -> Result<RunSummary, CoverageError>
    where
        F: Fn(TravelMode, &MultiPolygon<f64>) -> Result<TravelGraph, OsmError>,
    {
        let distances = self.config.distances.resolve()?;
        let boundary = read_boundary(&self.inputs.boundary)?;
        let providers = read_providers(&self.inputs.providers, &self.config.provider_columns)?;
        log::info!(
            "computing coverage of {} providers for {} modes at distances {}",
            providers.len(),
            self.config.modes.len(),
            distances.iter().map(|d| format!("{d}mi")).collect::<Vec<_>>().join(", ")
        );

        let output_dir = &self.inputs.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|e| CoverageError::io(output_dir, e))?;
        let summary_path = output_dir.join(SUMMARY_FILENAME);
        let cache = CoverageCache::open(&summary_path, self.config.reuse_cached_layers);
        let digests = InputDigests::from_paths(
            &self.inputs.providers,
            &self.inputs.boundary,
            &self.inputs.network_path(),
        )?;
        let ctx = RunContext {
            boundary: &boundary,
            providers: &providers,
            distances: &distances,
            digests: &digests,
            cache: &cache,
        };

        let mut summary = RunSummary::new(&distances, providers.len());
        for mode in self.config.modes.iter() {
            log::info!("building {mode} network");
            let graph = match build_graph(*mode, &boundary) {
                Ok(graph) => graph,
                Err(source) => {
                    let error = CoverageError::GraphBuildError {
                        mode: *mode,
                        source,
                    };
                    match self.config.mode_failure_policy {
                        ModeFailurePolicy::Abort => return Err(error),
                        ModeFailurePolicy::Skip => {
                            log::warn!("skipping {mode}: {error}");
                            summary.skipped_modes.insert(*mode, error.to_string());
                            continue;
                        }
                    }
                }
            };
            log::info!(
                "{mode} network has {} nodes and {} edges in {}",
                graph.n_nodes(),
                graph.n_edges(),
                graph.crs()
            );
            self.run_mode(&graph, &ctx, &mut summary)?;
        }

        summary.write(&summary_path)?;
        log::info!("wrote coverage summary to {}", summary_path.display());
        Ok(summary)
    }

    fn run_mode(
        &self,
        graph: &TravelGraph,
        ctx: &RunContext<'_>,
        summary: &mut RunSummary,
    ) -> Result<(), CoverageError> {
        let mode = graph.mode();
        let transformer = graph.crs().transformer()?;
        let boundary = transformer.project(ctx.boundary)?;
        let assignment = OriginAssignment::resolve(graph, ctx.providers, &transformer)?;
        let origin_osmids = assignment.unique_osmids(graph);
        let radii = self.config.buffer_radii(&mode);
        let engine = ServiceAreaEngine::new(
            graph,
            &radii,
            self.config.hull_algorithm.clone(),
            self.config.quadrant_segments,
            self.config.parallelize,
        )?;

        for distance in ctx.distances.iter() {
            let fingerprint = CellFingerprint {
                inputs: ctx.digests,
                mode,
                distance: *distance,
                radii: &radii,
                hull: &self.config.hull_algorithm,
                quadrant_segments: self.config.quadrant_segments,
                graph: &self.config.graph,
                origins: &origin_osmids,
            }
            .digest()?;
            if let Some(record) = ctx.cache.lookup(mode, distance, &fingerprint) {
                log::info!("{mode} {distance}mi: inputs unchanged, reusing layers");
                summary.insert(mode, distance, record);
                continue;
            }

            let coverage = engine.coverage(&assignment.unique_nodes, distance.meters())?;
            let result = CoverageResult::finalize(coverage.as_ref(), &boundary);

            let key = LayerKey::new(mode, *distance);
            let coverage_path = key.path(&self.inputs.output_dir, LayerKind::Coverage);
            let uncovered_path = key.path(&self.inputs.output_dir, LayerKind::Uncovered);
            write_layer(&coverage_path, &result.coverage, &transformer)?;
            write_layer(&uncovered_path, &result.uncovered, &transformer)?;
            log::info!(
                "{mode} {distance}mi: {:.1}% of the boundary covered",
                result.coverage_ratio * 100.0
            );

            let record = CoverageRecord::new(
                &result,
                coverage_path.display().to_string(),
                uncovered_path.display().to_string(),
                assignment.unique_nodes.len(),
                Some(fingerprint),
            );
            summary.insert(mode, distance, record);
        }
        Ok(())
    }
}
