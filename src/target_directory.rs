// Host -> job map from target discovery; last-resort source for job attribution.

use std::collections::HashMap;

use crate::models::{ADDRESS_LABEL, INSTANCE_LABEL, JOB_LABEL, POOL_LABEL, TargetDescriptor, label};

pub const UNKNOWN_JOB: &str = "unknown";

/// Read-only after build. Empty when discovery failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetDirectory {
    jobs: HashMap<String, String>,
}

impl TargetDirectory {
    pub fn job_for(&self, host_id: &str) -> Option<&str> {
        self.jobs.get(host_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Host id is the `instance` label, else the discovered `__address__`; targets with neither are
/// skipped. Job is `job`, else `pool`, else "unknown". A later target overrides an earlier one.
pub fn build_target_directory<'a>(
    targets: impl IntoIterator<Item = &'a TargetDescriptor>,
) -> TargetDirectory {
    let mut jobs = HashMap::new();
    for target in targets {
        let Some(host_id) = label(&target.labels, INSTANCE_LABEL)
            .or_else(|| label(&target.discovered_labels, ADDRESS_LABEL))
        else {
            continue;
        };
        let job = label(&target.labels, JOB_LABEL)
            .or_else(|| label(&target.labels, POOL_LABEL))
            .unwrap_or(UNKNOWN_JOB);
        jobs.insert(host_id.to_string(), job.to_string());
    }
    TargetDirectory { jobs }
}

impl FromIterator<(String, String)> for TargetDirectory {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            jobs: iter.into_iter().collect(),
        }
    }
}
