//! In-memory collaborators and ORD fixtures shared by the integration tests.

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers")]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ord_aggregator::config::AggregatorConfig;
use ord_aggregator::ord::client::{DocumentFetcher, FetchedDocuments};
use ord_aggregator::ord::model::{
    AccessStrategy, ApiResource, Capability, ConsumptionBundle, ConsumptionBundleReference,
    DataProduct, Document, EntityType, EventResource, IntegrationDependency, OrdResource, Package,
    Product, ResourceDefinition, SpecInput, StoredResource, Tombstone, Vendor,
};
use ord_aggregator::ord::reconciler::{
    Application, ApplicationService, BundleLinks, BundleReferenceService, BundledResourceService,
    NotFoundError, Page, ReferenceObjectType, Reconciler, Repositories, ResourceService,
    SpecService, Transaction, Transactioner, Upsert, Webhook, WebhookService,
};
use ord_aggregator::ord::resource::ResourceType;
use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "https://acme.example.com";
pub const PACKAGE_ID: &str = "ns:package:acme";
pub const BUNDLE_ID: &str = "ns:consumptionBundle:default";

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn document(base_url: Option<&str>) -> Document {
    serde_json::from_value(serde_json::json!({
        "openResourceDiscovery": "1.9",
        "policyLevel": "custom",
        "describedSystemInstance": base_url.map(|url| serde_json::json!({"baseUrl": url})),
    }))
    .expect("valid document fixture")
}

pub fn package(ord_id: &str) -> Package {
    Package {
        ord_id: ord_id.to_string(),
        title: "Acme".to_string(),
        short_description: "Acme package".to_string(),
        description: "Everything Acme exposes".to_string(),
        version: "1.0.0".to_string(),
        ..Package::default()
    }
}

pub fn bundle(ord_id: &str) -> ConsumptionBundle {
    ConsumptionBundle {
        ord_id: Some(ord_id.to_string()),
        title: "Default bundle".to_string(),
        ..ConsumptionBundle::default()
    }
}

pub fn definition(url: &str) -> ResourceDefinition {
    ResourceDefinition {
        definition_type: "openapi-v3".to_string(),
        media_type: "application/json".to_string(),
        url: url.to_string(),
        access_strategies: vec![AccessStrategy {
            strategy_type: "open".to_string(),
            ..AccessStrategy::default()
        }],
        ..ResourceDefinition::default()
    }
}

pub fn api(ord_id: &str, version: &str) -> ApiResource {
    ApiResource {
        ord_id: Some(ord_id.to_string()),
        title: "Users".to_string(),
        short_description: "Users API".to_string(),
        description: "Manage users".to_string(),
        version: version.to_string(),
        ord_package_id: Some(PACKAGE_ID.to_string()),
        api_protocol: Some("rest".to_string()),
        visibility: Some("public".to_string()),
        release_status: Some("active".to_string()),
        target_urls: Some(vec!["/users".to_string(), "/users/v2".to_string()]),
        part_of_consumption_bundles: Some(vec![ConsumptionBundleReference {
            bundle_ord_id: BUNDLE_ID.to_string(),
            default_target_url: String::new(),
        }]),
        resource_definitions: vec![definition("/users/openapi.json")],
        ..ApiResource::default()
    }
}

pub fn event(ord_id: &str, version: &str) -> EventResource {
    EventResource {
        ord_id: Some(ord_id.to_string()),
        title: "User events".to_string(),
        short_description: "User lifecycle events".to_string(),
        description: "Emitted when users change".to_string(),
        version: version.to_string(),
        ord_package_id: Some(PACKAGE_ID.to_string()),
        visibility: Some("public".to_string()),
        release_status: Some("active".to_string()),
        resource_definitions: vec![ResourceDefinition {
            definition_type: "asyncapi-v2".to_string(),
            ..definition("/events/asyncapi.json")
        }],
        ..EventResource::default()
    }
}

pub const ENTITY_TYPE_ID: &str = "ns:entityType:Order:v1";
pub const CAPABILITY_ID: &str = "ns:capability:ordersync:v1";
pub const INTEGRATION_DEPENDENCY_ID: &str = "ns:integrationDependency:crm:v1";
pub const DATA_PRODUCT_ID: &str = "ns:dataProduct:orders:v1";

pub fn entity_type(ord_id: &str) -> EntityType {
    EntityType {
        ord_id: ord_id.to_string(),
        local_id: Some("Order".to_string()),
        level: Some("aggregate".to_string()),
        title: "Order".to_string(),
        short_description: "Sales order".to_string(),
        description: "A customer order".to_string(),
        version: "1.0.0".to_string(),
        ord_package_id: Some(PACKAGE_ID.to_string()),
        visibility: Some("public".to_string()),
        release_status: Some("active".to_string()),
        ..EntityType::default()
    }
}

pub fn capability(ord_id: &str) -> Capability {
    Capability {
        ord_id: Some(ord_id.to_string()),
        capability_type: "custom".to_string(),
        custom_type: Some("acme:orderSync:v1".to_string()),
        title: "Order sync".to_string(),
        short_description: "Replicates orders".to_string(),
        description: "Keeps orders in sync with the CRM".to_string(),
        version: "1.0.0".to_string(),
        ord_package_id: Some(PACKAGE_ID.to_string()),
        visibility: Some("public".to_string()),
        release_status: Some("active".to_string()),
        ..Capability::default()
    }
}

pub fn integration_dependency(ord_id: &str) -> IntegrationDependency {
    IntegrationDependency {
        ord_id: Some(ord_id.to_string()),
        title: "CRM".to_string(),
        short_description: "Needs the CRM".to_string(),
        description: "Orders are enriched with CRM accounts".to_string(),
        version: "1.0.0".to_string(),
        ord_package_id: Some(PACKAGE_ID.to_string()),
        visibility: Some("public".to_string()),
        release_status: Some("active".to_string()),
        mandatory: Some(true),
        aspects: Some(serde_json::json!([{"title": "Accounts"}])),
        ..IntegrationDependency::default()
    }
}

pub fn data_product(ord_id: &str) -> DataProduct {
    DataProduct {
        ord_id: Some(ord_id.to_string()),
        title: "Orders".to_string(),
        short_description: "Order facts".to_string(),
        description: "Daily order facts".to_string(),
        version: "1.0.0".to_string(),
        ord_package_id: Some(PACKAGE_ID.to_string()),
        visibility: Some("public".to_string()),
        release_status: Some("active".to_string()),
        product_type: Some("primary".to_string()),
        category: Some("business-object".to_string()),
        output_ports: Some(serde_json::json!([{"ordId": "ns:apiResource:users"}])),
        ..DataProduct::default()
    }
}

pub fn tombstone(ord_id: &str) -> Tombstone {
    Tombstone {
        ord_id: ord_id.to_string(),
        removal_date: "2024-01-01T00:00:00Z".to_string(),
        description: None,
    }
}

/// Package, bundle and one API at the given version
pub fn catalog(api_version: &str) -> Document {
    Document {
        packages: vec![package(PACKAGE_ID)],
        consumption_bundles: vec![bundle(BUNDLE_ID)],
        api_resources: vec![api("ns:apiResource:users", api_version)],
        ..document(Some(BASE_URL))
    }
}

/// `catalog` plus one entity type, capability, integration dependency and data product
pub fn extended_catalog(api_version: &str) -> Document {
    Document {
        entity_types: vec![entity_type(ENTITY_TYPE_ID)],
        capabilities: vec![capability(CAPABILITY_ID)],
        integration_dependencies: vec![integration_dependency(INTEGRATION_DEPENDENCY_ID)],
        data_products: vec![data_product(DATA_PRODUCT_ID)],
        ..catalog(api_version)
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { resource_type: ResourceType, ord_id: String },
    Update { resource_type: ResourceType, ord_id: String },
    Delete { resource_type: ResourceType, id: String },
    CreateSpec { object_id: String, url: String },
    DeleteSpecs { object_id: String },
}

#[derive(Debug, Clone)]
struct Row {
    application_id: String,
    record: StoredResource,
}

/// Every persisted record plus a log of all mutating calls
#[derive(Debug, Default)]
pub struct Store {
    rows: Mutex<HashMap<ResourceType, Vec<Row>>>,
    calls: Mutex<Vec<Call>>,
    bundle_links: Mutex<HashMap<String, Vec<String>>>,
    default_target_urls: Mutex<HashMap<String, HashMap<String, String>>>,
    failing_applications: Mutex<HashSet<String>>,
}

impl Store {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn records(&self, resource_type: ResourceType) -> Vec<StoredResource> {
        self.rows
            .lock()
            .unwrap()
            .get(&resource_type)
            .map(|rows| rows.iter().map(|row| row.record.clone()).collect())
            .unwrap_or_default()
    }

    pub fn find(&self, resource_type: ResourceType, ord_id: &str) -> Option<StoredResource> {
        self.records(resource_type)
            .into_iter()
            .find(|record| record.ord_id.as_deref() == Some(ord_id))
    }

    /// Seed a record directly, bypassing the call log
    pub fn insert(&self, application_id: &str, resource_type: ResourceType, record: StoredResource) {
        self.rows
            .lock()
            .unwrap()
            .entry(resource_type)
            .or_default()
            .push(Row {
                application_id: application_id.to_string(),
                record,
            });
    }

    pub fn bundle_links(&self, object_id: &str) -> Vec<String> {
        self.bundle_links
            .lock()
            .unwrap()
            .get(object_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn default_target_urls(&self, object_id: &str) -> HashMap<String, String> {
        self.default_target_urls
            .lock()
            .unwrap()
            .get(object_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Every create for this application fails
    pub fn fail_application(&self, application_id: &str) {
        self.failing_applications
            .lock()
            .unwrap()
            .insert(application_id.to_string());
    }

    fn record_call(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn list(&self, application_id: &str, resource_type: ResourceType) -> Vec<StoredResource> {
        self.rows
            .lock()
            .unwrap()
            .get(&resource_type)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.application_id == application_id)
                    .map(|row| row.record.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn create<I: OrdResource>(
        &self,
        application_id: &str,
        resource_type: ResourceType,
        resource: Upsert<'_, I>,
    ) -> Result<String> {
        if self.failing_applications.lock().unwrap().contains(application_id) {
            return Err(anyhow!("database unavailable"));
        }
        let ord_id = resource.input.ord_id().unwrap_or_default().to_string();
        let id = match resource_type {
            ResourceType::Vendor | ResourceType::Product => ord_id.clone(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        self.insert(
            application_id,
            resource_type,
            StoredResource {
                id: id.clone(),
                ord_id: Some(ord_id.clone()),
                package_id: resource.package_id.map(str::to_string),
                version: version_of(resource.input),
                resource_hash: resource.resource_hash.map(str::to_string),
            },
        );
        self.record_call(Call::Create { resource_type, ord_id });
        Ok(id)
    }

    fn update<I: OrdResource>(
        &self,
        resource_type: ResourceType,
        id: &str,
        resource: Upsert<'_, I>,
    ) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .get_mut(&resource_type)
            .and_then(|rows| rows.iter_mut().find(|row| row.record.id == id))
            .ok_or_else(|| NotFoundError::new(resource_type.as_str(), id))?;
        row.record.package_id = resource.package_id.map(str::to_string);
        row.record.version = version_of(resource.input);
        row.record.resource_hash = resource.resource_hash.map(str::to_string);
        let ord_id = row.record.ord_id.clone().unwrap_or_default();
        drop(rows);
        self.record_call(Call::Update { resource_type, ord_id });
        Ok(())
    }

    fn delete(&self, resource_type: ResourceType, id: &str) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let rows = rows.entry(resource_type).or_default();
        let before = rows.len();
        rows.retain(|row| row.record.id != id);
        if rows.len() == before {
            return Err(NotFoundError::new(resource_type.as_str(), id).into());
        }
        self.record_call(Call::Delete {
            resource_type,
            id: id.to_string(),
        });
        Ok(())
    }

    fn link_bundles(&self, object_id: &str, links: &BundleLinks) {
        let mut bundle_links = self.bundle_links.lock().unwrap();
        let current = bundle_links.entry(object_id.to_string()).or_default();
        current.retain(|id| !links.to_delete.contains(id));
        current.extend(links.to_create.iter().cloned());
        self.default_target_urls
            .lock()
            .unwrap()
            .insert(object_id.to_string(), links.default_target_urls.clone());
    }
}

fn version_of<I: OrdResource>(input: &I) -> Option<String> {
    serde_json::to_value(input)
        .ok()?
        .get("version")?
        .as_str()
        .map(str::to_string)
}

/// Persistence fake for one resource type
pub struct Records<I> {
    store: Arc<Store>,
    resource_type: ResourceType,
    _input: PhantomData<fn(&I)>,
}

impl<I> Records<I> {
    pub fn new(store: &Arc<Store>, resource_type: ResourceType) -> Arc<Self> {
        Arc::new(Self {
            store: Arc::clone(store),
            resource_type,
            _input: PhantomData,
        })
    }
}

#[async_trait]
impl<I: OrdResource + Sync> ResourceService<I> for Records<I> {
    async fn list_by_application_id(&self, application_id: &str) -> Result<Vec<StoredResource>> {
        Ok(self.store.list(application_id, self.resource_type))
    }

    async fn create(&self, application_id: &str, resource: Upsert<'_, I>) -> Result<String> {
        self.store.create(application_id, self.resource_type, resource)
    }

    async fn update(&self, id: &str, resource: Upsert<'_, I>) -> Result<()> {
        self.store.update(self.resource_type, id, resource)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(self.resource_type, id)
    }
}

#[async_trait]
impl<I: OrdResource + Sync> BundledResourceService<I> for Records<I> {
    async fn list_by_application_id(&self, application_id: &str) -> Result<Vec<StoredResource>> {
        Ok(self.store.list(application_id, self.resource_type))
    }

    async fn create(
        &self,
        application_id: &str,
        resource: Upsert<'_, I>,
        bundles: &BundleLinks,
    ) -> Result<String> {
        let id = self.store.create(application_id, self.resource_type, resource)?;
        self.store.link_bundles(&id, bundles);
        Ok(id)
    }

    async fn update(&self, id: &str, resource: Upsert<'_, I>, bundles: &BundleLinks) -> Result<()> {
        self.store.update(self.resource_type, id, resource)?;
        self.store.link_bundles(id, bundles);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(self.resource_type, id)
    }
}

pub struct BundleReferences(pub Arc<Store>);

#[async_trait]
impl BundleReferenceService for BundleReferences {
    async fn get_bundle_ids_for_object(
        &self,
        _object_type: ReferenceObjectType,
        object_id: &str,
    ) -> Result<Vec<String>> {
        Ok(self.0.bundle_links(object_id))
    }
}

pub struct Specs(pub Arc<Store>);

#[async_trait]
impl SpecService for Specs {
    async fn create_by_reference_object_id(
        &self,
        _object_type: ReferenceObjectType,
        object_id: &str,
        spec: &SpecInput,
    ) -> Result<String> {
        self.0.record_call(Call::CreateSpec {
            object_id: object_id.to_string(),
            url: spec.url.clone(),
        });
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn delete_by_reference_object_id(
        &self,
        _object_type: ReferenceObjectType,
        object_id: &str,
    ) -> Result<()> {
        self.0.record_call(Call::DeleteSpecs {
            object_id: object_id.to_string(),
        });
        Ok(())
    }
}

pub fn repositories(store: &Arc<Store>) -> Repositories {
    Repositories {
        vendors: Records::<Vendor>::new(store, ResourceType::Vendor),
        products: Records::<Product>::new(store, ResourceType::Product),
        packages: Records::<Package>::new(store, ResourceType::Package),
        bundles: Records::<ConsumptionBundle>::new(store, ResourceType::ConsumptionBundle),
        apis: Records::<ApiResource>::new(store, ResourceType::ApiResource),
        events: Records::<EventResource>::new(store, ResourceType::EventResource),
        entity_types: Records::<EntityType>::new(store, ResourceType::EntityType),
        capabilities: Records::<Capability>::new(store, ResourceType::Capability),
        integration_dependencies: Records::<IntegrationDependency>::new(store, ResourceType::IntegrationDependency),
        data_products: Records::<DataProduct>::new(store, ResourceType::DataProduct),
        tombstones: Records::<Tombstone>::new(store, ResourceType::Tombstone),
        bundle_references: Arc::new(BundleReferences(Arc::clone(store))),
        specs: Arc::new(Specs(Arc::clone(store))),
    }
}

// ---------------------------------------------------------------------------
// Applications, webhooks, transactions, fetching
// ---------------------------------------------------------------------------

pub fn webhook_url(application_id: &str) -> String {
    format!("https://{application_id}.provider.example.com")
}

/// Applications served one per page
pub struct Applications(pub Vec<Application>);

#[async_trait]
impl ApplicationService for Applications {
    async fn list_page(&self, _page_size: usize, cursor: Option<&str>) -> Result<Page<Application>> {
        let offset: usize = cursor.map_or(Ok(0), str::parse)?;
        let data: Vec<Application> = self.0.iter().skip(offset).take(1).cloned().collect();
        let next = offset + data.len();
        Ok(Page {
            data,
            end_cursor: Some(next.to_string()),
            has_next_page: next < self.0.len(),
        })
    }
}

/// One ORD webhook per application
pub struct Webhooks;

#[async_trait]
impl WebhookService for Webhooks {
    async fn list_for_application(&self, application_id: &str) -> Result<Vec<Webhook>> {
        Ok(vec![
            Webhook {
                id: format!("{application_id}-ord"),
                application_id: application_id.to_string(),
                webhook_type: "OPEN_RESOURCE_DISCOVERY".to_string(),
                url: Some(webhook_url(application_id)),
                proxy_url: None,
            },
            Webhook {
                id: format!("{application_id}-other"),
                application_id: application_id.to_string(),
                webhook_type: "CONFIGURATION_CHANGED".to_string(),
                url: Some("https://ignored.example.com".to_string()),
                proxy_url: None,
            },
        ])
    }
}

#[derive(Debug, Default)]
pub struct TransactionCounts {
    pub begun: AtomicUsize,
    pub committed: AtomicUsize,
    pub rolled_back: AtomicUsize,
}

pub struct Transactions(pub Arc<TransactionCounts>);

struct FakeTransaction {
    counts: Arc<TransactionCounts>,
    committed: bool,
}

#[async_trait]
impl Transaction for FakeTransaction {
    async fn commit(&mut self) -> Result<()> {
        self.committed = true;
        self.counts.committed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback_unless_committed(&mut self) -> Result<()> {
        if !self.committed {
            self.counts.rolled_back.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

#[async_trait]
impl Transactioner for Transactions {
    async fn begin(&self) -> Result<Box<dyn Transaction>> {
        self.0.begun.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeTransaction {
            counts: Arc::clone(&self.0),
            committed: false,
        }))
    }
}

/// Serves documents per webhook URL
#[derive(Default)]
pub struct Fetcher {
    documents: Mutex<HashMap<String, Vec<Document>>>,
    fetched: Mutex<Vec<String>>,
    /// Raised after every fetch
    pub on_fetch: Mutex<Option<Arc<AtomicBool>>>,
}

impl Fetcher {
    pub fn serve(&self, webhook_url: &str, documents: Vec<Document>) {
        self.documents
            .lock()
            .unwrap()
            .insert(webhook_url.to_string(), documents);
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentFetcher for Fetcher {
    async fn fetch_documents(&self, webhook_url: &str) -> Result<FetchedDocuments> {
        self.fetched.lock().unwrap().push(webhook_url.to_string());
        if let Some(flag) = self.on_fetch.lock().unwrap().as_ref() {
            flag.store(true, Ordering::SeqCst);
        }
        let documents = self
            .documents
            .lock()
            .unwrap()
            .get(webhook_url)
            .cloned()
            .ok_or_else(|| anyhow!("connection refused: {webhook_url}"))?;
        Ok(FetchedDocuments {
            documents,
            base_url: None,
        })
    }
}

pub struct Harness {
    pub store: Arc<Store>,
    pub fetcher: Arc<Fetcher>,
    pub transactions: Arc<TransactionCounts>,
    pub reconciler: Reconciler,
}

impl Harness {
    pub fn new(application_ids: &[&str]) -> Self {
        Self::with_applications(
            application_ids
                .iter()
                .map(|id| Application {
                    id: (*id).to_string(),
                    ..Application::default()
                })
                .collect(),
        )
    }

    pub fn with_applications(applications: Vec<Application>) -> Self {
        let store = Arc::new(Store::default());
        let fetcher = Arc::new(Fetcher::default());
        let transactions = Arc::new(TransactionCounts::default());

        let reconciler = Reconciler::new(
            &AggregatorConfig::default(),
            Arc::new(Applications(applications)),
            Arc::new(Webhooks),
            Arc::new(Transactions(Arc::clone(&transactions))),
            Arc::clone(&fetcher) as Arc<dyn DocumentFetcher>,
            repositories(&store),
        );

        Self {
            store,
            fetcher,
            transactions,
            reconciler,
        }
    }

    pub fn serve(&self, application_id: &str, documents: Vec<Document>) {
        self.fetcher.serve(&webhook_url(application_id), documents);
    }
}
