//! Named entry points for every dashboard operation.

use crate::client::BciClient;
use crate::mutation::{MutationHandle, MutationOptions};
use crate::mutations::{
    CreateNode, CreateRelationship, CreateTask, DeleteNode, ExecuteCypher, StartPomodoro,
    StoreMemory, UpdateNode, UpdateTask,
};
use crate::operation::{Mutation, NoVariables};
use crate::queries::{
    DatabaseNodesVariables, GetDatabaseNodes, GetDatabaseSchema, GetHealthCheck, GetMemoryStats,
    GetMetrics, GetSystemLogs, GetTaskStats, GetTasks, SearchMemories, SearchMemoriesVariables,
    SystemLogsVariables, TasksVariables,
};
use crate::result::QueryResult;
use crate::watch::QueryWatcher;
use bci_types::{
    DatabaseNode, DatabaseSchema, HealthCheck, Memory, MemoryStats, Metrics, SystemLog, Task,
    TaskStats,
};
use serde_json::{Map, Value};

impl BciClient {
    // ── Reads ────────────────────────────────────────────────────

    pub async fn database_schema(&self) -> QueryResult<DatabaseSchema> {
        self.query::<GetDatabaseSchema>(&NoVariables {}).await
    }

    pub async fn database_nodes(
        &self,
        variables: &DatabaseNodesVariables,
    ) -> QueryResult<Vec<DatabaseNode>> {
        self.query::<GetDatabaseNodes>(variables).await
    }

    /// Nodes of one label with their `properties` strings decoded.
    /// Undecodable properties become empty objects.
    pub async fn parsed_database_nodes(
        &self,
        variables: &DatabaseNodesVariables,
    ) -> QueryResult<Vec<Map<String, Value>>> {
        self.database_nodes(variables)
            .await
            .map(|nodes| nodes.iter().map(DatabaseNode::parse_properties).collect())
    }

    pub async fn health_check(&self) -> QueryResult<HealthCheck> {
        self.query::<GetHealthCheck>(&NoVariables {}).await
    }

    /// Health report refreshed every 30 seconds until dropped.
    pub fn watch_health_check(&self) -> QueryWatcher<HealthCheck> {
        self.watch::<GetHealthCheck>(NoVariables {})
    }

    pub async fn memory_stats(&self) -> QueryResult<MemoryStats> {
        self.query::<GetMemoryStats>(&NoVariables {}).await
    }

    pub async fn search_memories(
        &self,
        variables: &SearchMemoriesVariables,
    ) -> QueryResult<Vec<Memory>> {
        self.query::<SearchMemories>(variables).await
    }

    pub async fn tasks(&self, variables: &TasksVariables) -> QueryResult<Vec<Task>> {
        self.query::<GetTasks>(variables).await
    }

    pub async fn task_stats(&self) -> QueryResult<TaskStats> {
        self.query::<GetTaskStats>(&NoVariables {}).await
    }

    pub async fn system_logs(
        &self,
        variables: &SystemLogsVariables,
    ) -> QueryResult<Vec<SystemLog>> {
        self.query::<GetSystemLogs>(variables).await
    }

    pub async fn metrics(&self) -> QueryResult<Metrics> {
        self.query::<GetMetrics>(&NoVariables {}).await
    }

    // ── Writes ───────────────────────────────────────────────────

    pub fn update_node(&self, options: Options<UpdateNode>) -> MutationHandle<UpdateNode> {
        self.mutation(options)
    }

    pub fn create_node(&self, options: Options<CreateNode>) -> MutationHandle<CreateNode> {
        self.mutation(options)
    }

    pub fn delete_node(&self, options: Options<DeleteNode>) -> MutationHandle<DeleteNode> {
        self.mutation(options)
    }

    pub fn execute_cypher(&self, options: Options<ExecuteCypher>) -> MutationHandle<ExecuteCypher> {
        self.mutation(options)
    }

    pub fn create_relationship(
        &self,
        options: Options<CreateRelationship>,
    ) -> MutationHandle<CreateRelationship> {
        self.mutation(options)
    }

    pub fn store_memory(&self, options: Options<StoreMemory>) -> MutationHandle<StoreMemory> {
        self.mutation(options)
    }

    pub fn create_task(&self, options: Options<CreateTask>) -> MutationHandle<CreateTask> {
        self.mutation(options)
    }

    pub fn update_task(&self, options: Options<UpdateTask>) -> MutationHandle<UpdateTask> {
        self.mutation(options)
    }

    pub fn start_pomodoro(&self, options: Options<StartPomodoro>) -> MutationHandle<StartPomodoro> {
        self.mutation(options)
    }
}

type Options<M> = MutationOptions<<M as Mutation>::Data>;
