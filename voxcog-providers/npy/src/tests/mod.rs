//! Tests covering `.npy` segmentation loading.

mod support;
