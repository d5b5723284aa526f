use axum::Router;
use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::context;
use crate::contracts;

pub struct ModuleEntry {
    pub name: &'static str,
    pub core: Arc<dyn contracts::Module>,
    pub rest: Option<Arc<dyn contracts::RestfulModule>>,
    pub db: Option<Arc<dyn contracts::DbModule>>,
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("name", &self.name)
            .field("has_rest", &self.rest.is_some())
            .field("has_db", &self.db.is_some())
            .finish()
    }
}

/// Runtime registry; modules run in registration order.
pub struct ModuleRegistry {
    modules: Vec<ModuleEntry>,
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.modules.iter().map(|m| m.name).collect();
        f.debug_struct("ModuleRegistry")
            .field("modules", &names)
            .finish()
    }
}

impl ModuleRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    // ---- Ordered phases: init → DB → REST ----

    pub async fn run_init_phase(&self, base_ctx: &context::ModuleCtx) -> Result<(), RegistryError> {
        for e in &self.modules {
            let ctx = base_ctx.clone().for_module(e.name);
            e.core
                .init(&ctx)
                .await
                .map_err(|source| RegistryError::Init {
                    module: e.name,
                    source,
                })?;
            tracing::debug!(module = e.name, "module initialized");
        }
        Ok(())
    }

    pub async fn run_db_phase(&self, db: &modkit_db::DbHandle) -> Result<(), RegistryError> {
        for e in &self.modules {
            if let Some(dbm) = &e.db {
                dbm.migrate(db)
                    .await
                    .map_err(|source| RegistryError::DbMigrate {
                        module: e.name,
                        source,
                    })?;
                tracing::info!(module = e.name, "migrations applied");
            }
        }
        Ok(())
    }

    pub fn run_rest_phase(
        &self,
        base_ctx: &context::ModuleCtx,
        mut router: Router,
    ) -> Result<Router, RegistryError> {
        for e in &self.modules {
            if let Some(rest) = &e.rest {
                let ctx = base_ctx.clone().for_module(e.name);
                router = rest
                    .register_rest(&ctx, router)
                    .map_err(|source| RegistryError::RestRegister {
                        module: e.name,
                        source,
                    })?;
            }
        }
        Ok(router)
    }

    pub fn get_module(&self, name: &str) -> Option<Arc<dyn contracts::Module>> {
        self.modules
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.core.clone())
    }
}

/// Collects modules and their capabilities; uniqueness enforced at build time.
#[derive(Default)]
pub struct RegistryBuilder {
    core: Vec<(&'static str, Arc<dyn contracts::Module>)>,
    rest: Vec<(&'static str, Arc<dyn contracts::RestfulModule>)>,
    db: Vec<(&'static str, Arc<dyn contracts::DbModule>)>,
    errors: Vec<String>,
}

impl RegistryBuilder {
    pub fn register_core(&mut self, m: Arc<dyn contracts::Module>) -> &mut Self {
        let name = m.name();
        if self.core.iter().any(|(n, _)| *n == name) {
            self.errors
                .push(format!("Module '{name}' is already registered"));
        } else {
            self.core.push((name, m));
        }
        self
    }

    pub fn register_rest(
        &mut self,
        name: &'static str,
        m: Arc<dyn contracts::RestfulModule>,
    ) -> &mut Self {
        self.rest.push((name, m));
        self
    }

    pub fn register_db(&mut self, name: &'static str, m: Arc<dyn contracts::DbModule>) -> &mut Self {
        self.db.push((name, m));
        self
    }

    /// Shorthand for a module that owns a schema and exposes REST routes.
    pub fn with_module<M>(mut self, m: Arc<M>) -> Self
    where
        M: contracts::Module + contracts::DbModule + contracts::RestfulModule,
    {
        let name = m.name();
        self.register_core(m.clone());
        self.register_db(name, m.clone());
        self.register_rest(name, m);
        self
    }

    /// Verify that every capability is bound to a known core module.
    pub fn build(self) -> Result<ModuleRegistry, RegistryError> {
        if !self.errors.is_empty() {
            return Err(RegistryError::InvalidRegistryConfiguration {
                errors: self.errors,
            });
        }

        let known: HashSet<&'static str> = self.core.iter().map(|(n, _)| *n).collect();
        for n in self
            .rest
            .iter()
            .map(|(n, _)| *n)
            .chain(self.db.iter().map(|(n, _)| *n))
        {
            if !known.contains(n) {
                return Err(RegistryError::UnknownModule(n.to_string()));
            }
        }

        let modules = self
            .core
            .into_iter()
            .map(|(name, core)| ModuleEntry {
                name,
                core,
                rest: self
                    .rest
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, m)| m.clone()),
                db: self
                    .db
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, m)| m.clone()),
            })
            .collect::<Vec<_>>();

        tracing::info!(
            modules = ?modules.iter().map(|m| m.name).collect::<Vec<_>>(),
            "module registry built"
        );
        Ok(ModuleRegistry { modules })
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown module '{0}'")]
    UnknownModule(String),
    #[error("invalid registry configuration: {errors:?}")]
    InvalidRegistryConfiguration { errors: Vec<String> },
    #[error("init failed for module '{module}'")]
    Init {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("DB migration failed for module '{module}'")]
    DbMigrate {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("REST register failed for module '{module}'")]
    RestRegister {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
