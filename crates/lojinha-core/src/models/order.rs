use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Server-side date string, passed through as-is.
    pub order_date: String,
    pub status: String,
    pub total: f64,
    pub payment_method: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl Order {
    /// Human-readable status, mirroring the server's status vocabulary.
    pub fn status_display(&self) -> &str {
        match self.status.as_str() {
            "pending" => "Pendente",
            "processing" => "Em processamento",
            "shipped" => "Enviado",
            "delivered" => "Entregue",
            "cancelled" => "Cancelado",
            other => other,
        }
    }

    pub fn payment_method_display(&self) -> &str {
        match self.payment_method.as_str() {
            "credit" => "Cartão de Crédito",
            "pix" => "Pix",
            "cash" => "Dinheiro na Entrega",
            other => other,
        }
    }
}

impl OrderItem {
    /// The server omits `total` on some records; fall back to price × quantity.
    pub fn line_total(&self) -> f64 {
        self.total.unwrap_or(self.price * self.quantity as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_order_record() {
        let json = r#"{
            "id": "o-7",
            "orderDate": "2024-11-02 14:31:00",
            "status": "shipped",
            "total": 89.8,
            "paymentMethod": "pix",
            "items": [
                {"id": "p1", "name": "Caneca", "price": 29.9, "quantity": 2, "total": 59.8},
                {"id": "p2", "name": "Adesivo", "price": 10.0, "quantity": 3}
            ]
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, "o-7");
        assert_eq!(order.status_display(), "Enviado");
        assert_eq!(order.payment_method_display(), "Pix");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].line_total(), 59.8);
        assert_eq!(order.items[1].line_total(), 30.0);
    }

    #[test]
    fn unknown_status_passes_through() {
        let json = r#"{"id":"o","orderDate":"","status":"refunded","total":0,"paymentMethod":"boleto"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status_display(), "refunded");
        assert_eq!(order.payment_method_display(), "boleto");
        assert!(order.items.is_empty());
    }
}
