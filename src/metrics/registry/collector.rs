// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Collector encoding the samples of the scrape being served

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use prometheus_client::collector::Collector;
use prometheus_client::encoding::{DescriptorEncoder, EncodeMetric, MetricEncoder};
use prometheus_client::metrics::counter::ConstCounter;
use prometheus_client::metrics::gauge::ConstGauge;

use crate::metrics::descriptors::{Metric, MetricKind};
use crate::metrics::sample::{Sample, SampleLabels};

/// Holds the latest published samples; metrics missing from them are not encoded.
#[derive(Clone, Debug, Default)]
pub(super) struct ScrapeCollector {
    samples: Arc<Mutex<Vec<Sample>>>,
}

impl ScrapeCollector {
    pub(super) fn publish(&self, samples: Vec<Sample>) {
        *self.lock() = samples;
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sample>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Collector for ScrapeCollector {
    fn encode(&self, mut encoder: DescriptorEncoder) -> Result<(), std::fmt::Error> {
        let samples = self.lock();

        for metric in Metric::ALL {
            let group: Vec<&Sample> = samples.iter().filter(|s| s.metric == metric).collect();
            let Some(last) = group.last() else {
                continue;
            };

            let descriptor = metric.descriptor();
            let mut metric_encoder = encoder.encode_descriptor(
                descriptor.name,
                descriptor.help,
                None,
                descriptor.kind.metric_type(),
            )?;

            // unlabeled metrics carry a single value
            if descriptor.labels.is_empty() {
                encode_value(descriptor.kind, last.value, metric_encoder)?;
                continue;
            }

            for sample in group {
                let family_encoder = match &sample.labels {
                    SampleLabels::Firmware(labels) => metric_encoder.encode_family(labels)?,
                    SampleLabels::Device(labels) => metric_encoder.encode_family(labels)?,
                    SampleLabels::None => continue,
                };
                encode_value(descriptor.kind, sample.value, family_encoder)?;
            }
        }

        Ok(())
    }
}

fn encode_value(
    kind: MetricKind,
    value: f64,
    encoder: MetricEncoder<'_>,
) -> Result<(), std::fmt::Error> {
    match kind {
        MetricKind::Gauge => ConstGauge::new(value).encode(encoder),
        MetricKind::Counter => ConstCounter::new(value).encode(encoder),
    }
}
