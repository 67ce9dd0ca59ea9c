/*
    ClusterViz
    https://github.com/dbalsom/clusterviz

    Copyright 2024 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------
*/
use crate::{
    feature::ClusterId,
    types::{lnglat::LngLat, shapes::VizDimensions},
};

/// A marker placed on the map surface at a geographic position, carrying a rendered badge
/// element.
///
/// Handles are created once per cluster id and reused for as long as the reconciler keeps them.
/// Each handle has a serial number that is unique for the lifetime of its reconciler, so two
/// handles for the same cluster id can be told apart if one was evicted and recreated.
#[derive(Debug)]
pub struct MarkerHandle<E> {
    id: ClusterId,
    serial: u64,
    position: LngLat,
    size: VizDimensions,
    element: E,
}

impl<E> MarkerHandle<E> {
    pub(crate) fn new(id: ClusterId, serial: u64, position: LngLat, size: VizDimensions, element: E) -> Self {
        Self {
            id,
            serial,
            position,
            size,
            element,
        }
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn position(&self) -> LngLat {
        self.position
    }

    /// Pixel dimensions of the marker element. The element should be centered on the position.
    pub fn size(&self) -> VizDimensions {
        self.size
    }

    pub fn element(&self) -> &E {
        &self.element
    }
}
