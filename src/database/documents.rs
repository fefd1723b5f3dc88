use crate::database::connection::Database;
use anyhow::Result;
use rusqlite::params;
use serde_json::Value;

impl Database {
    /// Insert a document into a collection, returning its row id
    pub fn create_document(&self, collection: &str, body: &Value) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO documents (collection, body) VALUES (?1, ?2)",
            params![collection, body.to_string()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get documents from a collection, newest first
    ///
    /// Each document gets its row id injected as a string `_id` field so
    /// clients can reference it later.
    pub fn get_documents(&self, collection: &str, limit: Option<usize>) -> Result<Vec<Value>> {
        let conn = self.conn.lock().unwrap();
        // SQLite treats a negative LIMIT as unlimited
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = conn.prepare(
            "SELECT id, body FROM documents WHERE collection = ?1 ORDER BY id DESC LIMIT ?2",
        )?;

        let doc_iter = stmt.query_map(params![collection, limit], |row| {
            let id: i64 = row.get(0)?;
            let body: String = row.get(1)?;
            Ok((id, body))
        })?;

        let mut documents = Vec::new();
        for doc in doc_iter {
            let (id, body) = doc?;
            documents.push(inflate_document(id, &body));
        }

        Ok(documents)
    }

    /// Get a single document by row id
    pub fn get_document_by_id(&self, collection: &str, id: i64) -> Result<Option<Value>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, body FROM documents WHERE collection = ?1 AND id = ?2")?;

        let mut rows = stmt.query_map(params![collection, id], |row| {
            let id: i64 = row.get(0)?;
            let body: String = row.get(1)?;
            Ok((id, body))
        })?;

        match rows.next() {
            Some(row) => {
                let (id, body) = row?;
                Ok(Some(inflate_document(id, &body)))
            }
            None => Ok(None),
        }
    }

    /// Get documents where a top-level field equals a string value, newest first
    ///
    /// Uses JSON1's json_extract so the filter runs inside SQLite instead of
    /// deserializing every document.
    pub fn get_documents_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        let conn = self.conn.lock().unwrap();
        // SQLite treats a negative LIMIT as unlimited
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let json_path = format!("$.{}", field);
        let mut stmt = conn.prepare(
            "SELECT id, body FROM documents
             WHERE collection = ?1 AND json_extract(body, ?2) = ?3
             ORDER BY id DESC LIMIT ?4",
        )?;

        let doc_iter = stmt.query_map(params![collection, json_path, value, limit], |row| {
            let id: i64 = row.get(0)?;
            let body: String = row.get(1)?;
            Ok((id, body))
        })?;

        let mut documents = Vec::new();
        for doc in doc_iter {
            let (id, body) = doc?;
            documents.push(inflate_document(id, &body));
        }

        Ok(documents)
    }

    /// Update a document body in place
    pub fn update_document(&self, collection: &str, id: i64, body: &Value) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE documents SET body = ?1 WHERE collection = ?2 AND id = ?3",
            params![body.to_string(), collection, id],
        )?;
        Ok(updated > 0)
    }

    /// Count documents in a collection
    pub fn count_documents(&self, collection: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// List all collections with their document counts
    pub fn list_collections(&self) -> Result<Vec<(String, i64)>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT collection, COUNT(*) FROM documents GROUP BY collection ORDER BY collection",
        )?;

        let row_iter = stmt.query_map([], |row| {
            let name: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((name, count))
        })?;

        let mut collections = Vec::new();
        for row in row_iter {
            collections.push(row?);
        }

        Ok(collections)
    }
}

/// Parse a stored body and inject the row id as a string `_id`
fn inflate_document(id: i64, body: &str) -> Value {
    let mut doc: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    if let Value::Object(ref mut map) = doc {
        map.insert("_id".to_string(), Value::String(id.to_string()));
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_and_get_documents() {
        let db = Database::new_in_memory().unwrap();

        let id = db
            .create_document("player", &json!({"address": "wallet-1", "stats": {"level": 1}}))
            .unwrap();
        assert!(id > 0);

        db.create_document("player", &json!({"address": "wallet-2"}))
            .unwrap();

        let docs = db.get_documents("player", None).unwrap();
        assert_eq!(docs.len(), 2);
        // Newest first
        assert_eq!(docs[0]["address"], "wallet-2");
        assert_eq!(docs[1]["address"], "wallet-1");
        assert_eq!(docs[1]["_id"], id.to_string());
        assert_eq!(docs[1]["stats"]["level"], 1);
    }

    #[test]
    fn test_get_documents_respects_limit() {
        let db = Database::new_in_memory().unwrap();
        for i in 0..5 {
            db.create_document("item", &json!({"name": format!("item-{}", i)}))
                .unwrap();
        }

        let docs = db.get_documents("item", Some(3)).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0]["name"], "item-4");
    }

    #[test]
    fn test_get_documents_by_field() {
        let db = Database::new_in_memory().unwrap();
        db.create_document("item", &json!({"owner_wallet": "alice", "name": "Ion Blade"}))
            .unwrap();
        db.create_document("item", &json!({"owner_wallet": "bob", "name": "Aether Core"}))
            .unwrap();
        db.create_document("item", &json!({"owner_wallet": "alice", "name": "Flux Capacitor"}))
            .unwrap();

        let docs = db
            .get_documents_by_field("item", "owner_wallet", "alice", None)
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["name"], "Flux Capacitor");
        assert_eq!(docs[1]["name"], "Ion Blade");

        let docs = db
            .get_documents_by_field("item", "owner_wallet", "nobody", None)
            .unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_get_document_by_id() {
        let db = Database::new_in_memory().unwrap();
        let id = db
            .create_document("listing", &json!({"status": "open", "price": 12}))
            .unwrap();

        let doc = db.get_document_by_id("listing", id).unwrap().unwrap();
        assert_eq!(doc["status"], "open");
        assert_eq!(doc["_id"], id.to_string());

        assert!(db.get_document_by_id("listing", id + 100).unwrap().is_none());
        assert!(db.get_document_by_id("trade", id).unwrap().is_none());
    }

    #[test]
    fn test_update_document() {
        let db = Database::new_in_memory().unwrap();
        let id = db
            .create_document("listing", &json!({"status": "open"}))
            .unwrap();

        let updated = db
            .update_document("listing", id, &json!({"status": "sold"}))
            .unwrap();
        assert!(updated);

        let doc = db.get_document_by_id("listing", id).unwrap().unwrap();
        assert_eq!(doc["status"], "sold");

        assert!(!db
            .update_document("listing", id + 100, &json!({"status": "sold"}))
            .unwrap());
    }

    #[test]
    fn test_counts_and_collections() {
        let db = Database::new_in_memory().unwrap();
        assert_eq!(db.count_documents("player").unwrap(), 0);

        db.create_document("player", &json!({"address": "a"})).unwrap();
        db.create_document("player", &json!({"address": "b"})).unwrap();
        db.create_document("quest", &json!({"title": "Cull the Wraith"}))
            .unwrap();

        assert_eq!(db.count_documents("player").unwrap(), 2);
        assert_eq!(db.count_documents("quest").unwrap(), 1);

        let collections = db.list_collections().unwrap();
        assert_eq!(
            collections,
            vec![("player".to_string(), 2), ("quest".to_string(), 1)]
        );
    }
}
