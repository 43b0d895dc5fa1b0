use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for a `jsondto` crate as seen from the
/// caller's Cargo.toml.
///
/// Derive macros emit fully qualified paths into the user's crate, and the
/// user may depend on the runtime directly, through the `jsondto` facade,
/// or under a renamed key.
///
/// # Example
///
/// ```rust
/// # use jsondto_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("jsondto_mapper"));
/// ```
///
/// Reading the manifest is not cheap; call this once per macro invocation
/// and pass the resulting path around.
///
/// # Resolution rules
///
/// 1. The crate is a dependency under its own name: `::jsondto_mapper`.
/// 2. The crate is a dependency under another key
///    (`dto = { package = "jsondto_mapper" }`): `::dto`.
/// 3. The crate name starts with `jsondto_` and the facade `jsondto` is a
///    dependency: `::jsondto::mapper`.
/// 4. Repeat step 1-3 in `dev-dependencies`.
/// 5. Otherwise, fall back to `::crate_name`.
///
/// ## Note
///
/// A crate that derives on its own types should add
/// `extern crate self as jsondto_mapper;` so the fallback path resolves.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "jsondto";
const CRATE_PREFIX: &str = "jsondto_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    #[inline]
    fn parse_path(path: &str) -> syn::Path {
        syn::parse_str(path).unwrap_or_else(|_| panic!("`{path}` is not a valid path"))
    }

    // Key under which `name` was renamed, if any.
    fn renamed_key<'t>(deps: &'t Table, name: &str) -> Option<&'t str> {
        deps.iter().find_map(|(key, item)| {
            let package = item.get("package")?.as_str()?;
            (package == name).then_some(key)
        })
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_path(&format!("::{name}")));
        }

        if let Some(key) = Self::renamed_key(deps, name) {
            return Some(Self::parse_path(&format!("::{}", key.replace('-', "_"))));
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        let facade = if deps.contains_key(FACADE_NAME) {
            FACADE_NAME
        } else {
            Self::renamed_key(deps, FACADE_NAME)?
        };
        let facade = facade.replace('-', "_");
        Some(Self::parse_path(&format!("::{facade}::{module}")))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the top-level documentation for the resolution
    /// order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::parse_path(&format!("::{name}")))
    }

    /// Obtain the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// The parsed manifest is cached per path and re-read only when the file's
    /// modified time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use quote::ToTokens;
    use std::time::SystemTime;
    use toml_edit::Document;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::<str>::from(text)).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn path_string(path: syn::Path) -> String {
        path.to_token_stream().to_string().replace(' ', "")
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\njsondto_mapper = \"0.0.1\"\n");
        assert_eq!(path_string(m.get_crate_path("jsondto_mapper")), "::jsondto_mapper");
    }

    #[test]
    fn facade_dependency() {
        let m = manifest("[dependencies]\njsondto = \"0.0.1\"\n");
        assert_eq!(path_string(m.get_crate_path("jsondto_mapper")), "::jsondto::mapper");
    }

    #[test]
    fn renamed_dependency() {
        let m = manifest("[dependencies]\ndto = { package = \"jsondto_mapper\", version = \"0.0.1\" }\n");
        assert_eq!(path_string(m.get_crate_path("jsondto_mapper")), "::dto");

        let m = manifest("[dependencies]\njson-mapper = { package = \"jsondto_mapper\" }\n");
        assert_eq!(path_string(m.get_crate_path("jsondto_mapper")), "::json_mapper");

        let m = manifest("[dependencies]\nmy-json = { package = \"jsondto\", version = \"0.0.1\" }\n");
        assert_eq!(path_string(m.get_crate_path("jsondto_mapper")), "::my_json::mapper");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\njsondto = \"0.0.1\"\n");
        assert_eq!(path_string(m.get_crate_path("jsondto_mapper")), "::jsondto::mapper");

        let m = manifest("[package]\nname = \"jsondto_mapper\"\n");
        assert_eq!(path_string(m.get_crate_path("jsondto_mapper")), "::jsondto_mapper");
    }
}
