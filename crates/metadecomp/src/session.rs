//! One network with its current decomposition and overview.
//!
//! Loading a network replaces everything; cloning or decomposing again drops the results that
//! depended on the previous state. Steps that run before their inputs exist fail with a
//! precondition error and leave the session untouched.

use crate::algorithm::{self, DecompositionAlgorithm};
use crate::base_graph::{BaseGraph, CloneReport};
use crate::config::DecompositionConfig;
use crate::decomposition::Decomposition;
use crate::error::{Error, Result, Warning};
use crate::network::{Network, NetworkDocument};
use crate::overview::{OverviewGraph, OverviewOptions};
use crate::subsystem::SubsystemId;
use crate::view::{SbgnTranslator, SubsystemView, ViewOptions};
use metadecomp_graph::NodeId;
use tracing::info;

#[derive(Default)]
pub struct Session {
    base: Option<BaseGraph>,
    decomposition: Option<Decomposition>,
    overview: Option<OverviewGraph>,
    warnings: Vec<Warning>,
    last_cloning: Option<CloneReport>,
    config: DecompositionConfig,
    overview_options: OverviewOptions,
    view_options: ViewOptions,
    sbgn: Option<Box<dyn SbgnTranslator>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecompositionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn set_sbgn_translator(&mut self, translator: Option<Box<dyn SbgnTranslator>>) {
        self.sbgn = translator;
    }

    pub fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DecompositionConfig) {
        self.config = config;
    }

    pub fn set_overview_options(&mut self, options: OverviewOptions) {
        self.overview_options = options;
    }

    pub fn set_view_options(&mut self, options: ViewOptions) {
        self.view_options = options;
    }

    /// Replaces the current network and drops every derived result.
    pub fn load_network(&mut self, network: Network) {
        let base = BaseGraph::new(network);
        info!(
            species = base.species().len(),
            reactions = base.reactions().len(),
            "network loaded"
        );
        self.base = Some(base);
        self.decomposition = None;
        self.overview = None;
        self.warnings.clear();
        self.last_cloning = None;
    }

    pub fn load_network_json(&mut self, text: &str) -> Result<()> {
        let network = NetworkDocument::from_json_str(text)?.into_network()?;
        self.load_network(network);
        Ok(())
    }

    pub fn has_network(&self) -> bool {
        self.base.is_some()
    }

    pub fn base(&self) -> Result<&BaseGraph> {
        self.base.as_ref().ok_or(Error::NoNetwork)
    }

    /// Clones every not yet cloned original species with degree `>= degree`.
    pub fn clone_species_above(&mut self, degree: usize) -> Result<CloneReport> {
        let base = self.base.as_mut().ok_or(Error::NoNetwork)?;
        let candidates: Vec<NodeId> = base
            .original_species_with_degree_at_least(degree)
            .into_iter()
            .filter(|&v| !base.is_cloned(v))
            .collect();
        let report = base.clone_species(&candidates)?;
        if report.cloned_species > 0 {
            self.decomposition = None;
            self.overview = None;
        }
        Ok(report)
    }

    pub fn decompose(&mut self, algorithm: &dyn DecompositionAlgorithm) -> Result<&Decomposition> {
        let base = self.base.as_mut().ok_or(Error::NoNetwork)?;
        let outcome = algorithm::run(base, algorithm, &self.config)?;
        self.warnings = outcome.warnings;
        self.last_cloning = outcome.cloning;
        self.overview = None;
        Ok(self.decomposition.insert(outcome.decomposition))
    }

    pub fn decomposition(&self) -> Result<&Decomposition> {
        self.decomposition.as_ref().ok_or(Error::NoDecomposition)
    }

    /// Non-fatal problems reported by the last decomposition.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Hub cloning performed as part of the last decomposition, if any.
    pub fn last_cloning(&self) -> Option<CloneReport> {
        self.last_cloning
    }

    pub fn build_overview(&mut self) -> Result<&mut OverviewGraph> {
        let base = self.base.as_ref().ok_or(Error::NoNetwork)?;
        let decomposition = self.decomposition.as_ref().ok_or(Error::NoDecomposition)?;
        let overview = OverviewGraph::build(base, decomposition.clone(), self.overview_options);
        Ok(self.overview.insert(overview))
    }

    pub fn overview(&self) -> Result<&OverviewGraph> {
        self.overview.as_ref().ok_or(Error::NoOverview)
    }

    pub fn overview_mut(&mut self) -> Result<&mut OverviewGraph> {
        self.overview.as_mut().ok_or(Error::NoOverview)
    }

    /// Replaces the overview selection with the named subsystems.
    pub fn select_subsystems(&mut self, names: &[&str]) -> Result<Vec<SubsystemId>> {
        let overview = self.overview.as_mut().ok_or(Error::NoOverview)?;
        let ids = names
            .iter()
            .map(|&name| {
                overview
                    .decomposition()
                    .find_by_name(name)
                    .ok_or_else(|| Error::UnknownSubsystem {
                        name: name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        overview.set_selected(&ids)?;
        Ok(ids)
    }

    /// Consolidated view of the subsystems selected in the overview.
    pub fn show_selected_subsystems(&self) -> Result<SubsystemView> {
        let overview = self.overview.as_ref().ok_or(Error::NoOverview)?;
        let base = self.base.as_ref().ok_or(Error::NoNetwork)?;
        let selection = overview.selected_subsystems();
        let mut view = SubsystemView::consolidate(
            base,
            overview.decomposition(),
            &selection,
            &self.view_options,
        )?;
        if let Some(t) = &self.sbgn {
            view.apply_sbgn(base, t.as_ref());
        }
        Ok(view)
    }
}
