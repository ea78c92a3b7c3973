//! In-memory provider clients for dispatcher tests.

use async_trait::async_trait;
use platformtool_cloud::{
    CloudError, ComputeClient, Dispatcher, DnsClient, LaunchSpec, ObjectStoreClient, RecordChange,
    Result, TagSet, ZoneSpec,
};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub fn fixtures() -> (Arc<FakeCompute>, Arc<FakeStore>, Arc<FakeDns>, Dispatcher) {
    let compute = Arc::new(FakeCompute::default());
    let store = Arc::new(FakeStore::default());
    let dns = Arc::new(FakeDns::default());
    let dispatcher = Dispatcher::new(compute.clone(), store.clone(), dns.clone());
    (compute, store, dns, dispatcher)
}

// ---- compute ----

#[derive(Debug, Clone)]
pub struct FakeInstance {
    pub id: String,
    pub spec: LaunchSpec,
}

#[derive(Default)]
pub struct FakeCompute {
    pub instances: Mutex<Vec<FakeInstance>>,
    pub started: Mutex<Vec<String>>,
    pub stopped: Mutex<Vec<String>>,
}

impl FakeCompute {
    #[allow(dead_code)]
    pub fn seed_instance(&self, id: &str, tags: TagSet) {
        self.instances.lock().unwrap().push(FakeInstance {
            id: id.to_string(),
            spec: LaunchSpec {
                image_id: String::new(),
                instance_type: String::new(),
                availability_zone: String::new(),
                subnet_id: String::new(),
                tags,
            },
        });
    }
}

#[async_trait]
impl ComputeClient for FakeCompute {
    async fn run_instance(&self, spec: &LaunchSpec) -> Result<String> {
        let mut instances = self.instances.lock().unwrap();
        let id = format!("i-{:04}", instances.len() + 1);
        instances.push(FakeInstance {
            id: id.clone(),
            spec: spec.clone(),
        });
        Ok(id)
    }

    async fn describe_instances(
        &self,
        filter: &TagSet,
        instance_ids: &[String],
    ) -> Result<Vec<String>> {
        let instances = self.instances.lock().unwrap();
        Ok(instances
            .iter()
            .filter(|i| instance_ids.is_empty() || instance_ids.contains(&i.id))
            .filter(|i| {
                filter
                    .iter()
                    .all(|tag| i.spec.tags.get(&tag.key) == Some(tag.value.as_str()))
            })
            .map(|i| i.id.clone())
            .collect())
    }

    async fn start_instance(&self, instance_id: &str) -> Result<()> {
        self.started.lock().unwrap().push(instance_id.to_string());
        Ok(())
    }

    async fn stop_instance(&self, instance_id: &str) -> Result<()> {
        self.stopped.lock().unwrap().push(instance_id.to_string());
        Ok(())
    }
}

// ---- object storage ----

#[derive(Debug, Clone)]
pub struct FakeBucket {
    pub name: String,
    pub tags: Option<TagSet>,
    pub public_access_blocked: bool,
}

#[derive(Default)]
pub struct FakeStore {
    pub buckets: Mutex<Vec<FakeBucket>>,
    /// (bucket, key, local path)
    pub uploads: Mutex<Vec<(String, String, String)>>,
}

impl FakeStore {
    #[allow(dead_code)]
    pub fn seed_bucket(&self, name: &str, tags: Option<TagSet>) {
        self.buckets.lock().unwrap().push(FakeBucket {
            name: name.to_string(),
            tags,
            public_access_blocked: true,
        });
    }

    #[allow(dead_code)]
    pub fn bucket(&self, name: &str) -> FakeBucket {
        self.buckets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.name == name)
            .cloned()
            .unwrap_or_else(|| panic!("no bucket named {name}"))
    }
}

#[async_trait]
impl ObjectStoreClient for FakeStore {
    async fn create_bucket(&self, name: &str) -> Result<String> {
        self.buckets.lock().unwrap().push(FakeBucket {
            name: name.to_string(),
            tags: None,
            public_access_blocked: true,
        });
        Ok(name.to_string())
    }

    async fn tag_bucket(&self, name: &str, tags: &TagSet) -> Result<()> {
        let mut buckets = self.buckets.lock().unwrap();
        let bucket = buckets
            .iter_mut()
            .find(|b| b.name == name)
            .ok_or_else(|| CloudError::Api(format!("no such bucket: {name}")))?;
        bucket.tags = Some(tags.clone());
        Ok(())
    }

    async fn bucket_tags(&self, name: &str) -> Result<Option<TagSet>> {
        let buckets = self.buckets.lock().unwrap();
        let bucket = buckets
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| CloudError::Api(format!("no such bucket: {name}")))?;
        Ok(bucket.tags.clone())
    }

    async fn list_buckets(&self) -> Result<Vec<String>> {
        Ok(self
            .buckets
            .lock()
            .unwrap()
            .iter()
            .map(|b| b.name.clone())
            .collect())
    }

    async fn allow_public_access(&self, name: &str) -> Result<()> {
        let mut buckets = self.buckets.lock().unwrap();
        let bucket = buckets
            .iter_mut()
            .find(|b| b.name == name)
            .ok_or_else(|| CloudError::Api(format!("no such bucket: {name}")))?;
        bucket.public_access_blocked = false;
        Ok(())
    }

    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<()> {
        self.uploads.lock().unwrap().push((
            bucket.to_string(),
            key.to_string(),
            path.display().to_string(),
        ));
        Ok(())
    }
}

// ---- dns ----

#[derive(Debug, Clone)]
pub struct FakeZone {
    pub id: String,
    pub spec: ZoneSpec,
    pub tags: TagSet,
}

#[derive(Default)]
pub struct FakeDns {
    pub zones: Mutex<Vec<FakeZone>>,
    pub changes: Mutex<Vec<RecordChange>>,
}

impl FakeDns {
    #[allow(dead_code)]
    pub fn seed_zone(&self, id: &str, tags: TagSet) {
        self.zones.lock().unwrap().push(FakeZone {
            id: id.to_string(),
            spec: ZoneSpec {
                name: String::new(),
                caller_reference: String::new(),
                private: false,
                vpc: None,
            },
            tags,
        });
    }

    #[allow(dead_code)]
    pub fn zone(&self, id: &str) -> FakeZone {
        self.zones
            .lock()
            .unwrap()
            .iter()
            .find(|z| z.id == id)
            .cloned()
            .unwrap_or_else(|| panic!("no zone with id {id}"))
    }
}

#[async_trait]
impl DnsClient for FakeDns {
    async fn create_zone(&self, spec: &ZoneSpec) -> Result<String> {
        let mut zones = self.zones.lock().unwrap();
        let id = format!("Z{:04}", zones.len() + 1);
        zones.push(FakeZone {
            id: id.clone(),
            spec: spec.clone(),
            tags: TagSet::new(),
        });
        Ok(id)
    }

    async fn tag_zone(&self, zone_id: &str, tags: &TagSet) -> Result<()> {
        let mut zones = self.zones.lock().unwrap();
        let zone = zones
            .iter_mut()
            .find(|z| z.id == zone_id)
            .ok_or_else(|| CloudError::Api(format!("no such zone: {zone_id}")))?;
        zone.tags = tags.clone();
        Ok(())
    }

    async fn zone_tags(&self, zone_id: &str) -> Result<TagSet> {
        let zones = self.zones.lock().unwrap();
        let zone = zones
            .iter()
            .find(|z| z.id == zone_id)
            .ok_or_else(|| CloudError::Api(format!("no such zone: {zone_id}")))?;
        Ok(zone.tags.clone())
    }

    async fn change_record(&self, change: &RecordChange) -> Result<()> {
        self.changes.lock().unwrap().push(change.clone());
        Ok(())
    }
}
