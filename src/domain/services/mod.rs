mod catalog_loader;

pub use catalog_loader::CatalogLoader;
