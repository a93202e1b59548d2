mod settings;
mod store;
