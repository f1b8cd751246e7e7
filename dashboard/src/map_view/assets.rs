/// Kind of asset injected into the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stylesheet,
    Script,
}

/// CDN resource with its subresource-integrity hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapAsset {
    pub kind: AssetKind,
    pub url: &'static str,
    pub integrity: &'static str,
}

/// Leaflet 1.9.4 stylesheet and script, in injection order.
pub const LEAFLET_ASSETS: [MapAsset; 2] = [
    MapAsset {
        kind: AssetKind::Stylesheet,
        url: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css",
        integrity: "sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY=",
    },
    MapAsset {
        kind: AssetKind::Script,
        url: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js",
        integrity: "sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo=",
    },
];

/// Page (or document) that map assets are injected into.
pub trait AssetHost {
    type Handle;

    /// Whether the mapping library is already available.
    fn library_loaded(&self) -> bool;

    fn inject(&mut self, asset: &MapAsset) -> Self::Handle;

    fn remove(&mut self, handle: Self::Handle);
}

/// Assets injected for the lifetime of a map component.
///
/// Nothing is injected when the host already has the library. Everything
/// that was injected is removed when the guard drops.
pub struct ScopedAssets<'h, H: AssetHost> {
    host: &'h mut H,
    handles: Vec<H::Handle>,
}

impl<'h, H: AssetHost> ScopedAssets<'h, H> {
    pub fn acquire(host: &'h mut H, assets: &[MapAsset]) -> Self {
        let handles = if host.library_loaded() {
            Vec::new()
        } else {
            assets.iter().map(|asset| host.inject(asset)).collect()
        };
        Self { host, handles }
    }

    /// Number of assets this guard injected.
    pub fn injected(&self) -> usize {
        self.handles.len()
    }

    pub fn host(&self) -> &H {
        self.host
    }
}

impl<H: AssetHost> Drop for ScopedAssets<'_, H> {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            self.host.remove(handle);
        }
    }
}
