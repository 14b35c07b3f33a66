//! Linear stack run: zone, optional binding, records, with outputs exported as
//! soon as the zone exists.
use tracing::info;

use crate::config::GcpEndpoints;
use crate::error::StackError;
use crate::model::{GcpDnsZone, GcpDnsZoneStackInput};
use crate::outputs::{StackOutputs, export_outputs};
use crate::provider::{DnsZoneProvider, bootstrap};
use crate::records::build_records;
use crate::zone::{build_access_binding, build_zone};

/// Provider handle plus whatever the run has exported so far.
pub struct StackContext<P> {
    provider: P,
    outputs: Option<StackOutputs>,
}

impl<P: DnsZoneProvider> StackContext<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            outputs: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// `None` until the zone has been created.
    pub fn outputs(&self) -> Option<&StackOutputs> {
        self.outputs.as_ref()
    }

    pub fn into_outputs(self) -> Option<StackOutputs> {
        self.outputs
    }

    fn export(&mut self, outputs: StackOutputs) {
        self.outputs = Some(outputs);
    }
}

/// Provision every resource for `target`. Aborts on the first failing step.
pub async fn resources<P: DnsZoneProvider>(
    ctx: &mut StackContext<P>,
    target: &GcpDnsZone,
) -> Result<(), StackError> {
    let zone = build_zone(target, ctx.provider()).await?;

    let outputs = export_outputs(&zone);
    info!(
        zone = %outputs.managed_zone_name,
        project = %outputs.gcp_project_id,
        nameservers = outputs.nameservers.len(),
        "outputs exported"
    );
    ctx.export(outputs);

    build_access_binding(target, &zone, ctx.provider()).await?;
    let created = build_records(&target.spec.records, &zone, ctx.provider()).await?;

    info!(zone = %zone.name, records = created.len(), "stack run complete");
    Ok(())
}

/// Result of a full run: the outputs exported (if the zone got created) and the
/// failure, if any.
#[derive(Debug)]
pub struct StackRun {
    pub outputs: Option<StackOutputs>,
    pub result: Result<(), StackError>,
}

/// Bootstrap the Google provider from the input's credential and run the stack.
pub async fn run(input: &GcpDnsZoneStackInput, endpoints: GcpEndpoints) -> StackRun {
    let provider = match bootstrap(&input.gcp_credential, endpoints) {
        Ok(provider) => provider,
        Err(err) => {
            return StackRun {
                outputs: None,
                result: Err(err),
            };
        }
    };

    let mut ctx = StackContext::new(provider);
    let result = resources(&mut ctx, &input.target).await;
    StackRun {
        outputs: ctx.into_outputs(),
        result,
    }
}
