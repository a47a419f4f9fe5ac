//! Infrastructure 層
//!
//! 外部システムとの接続（永続化、翻訳 API、WebSocket 接続への送信）を担当するレイヤー。
//! Domain 層が定義する trait を実装します。

pub mod dto;
pub mod hub;
pub mod repository;
pub mod translation;

pub use hub::ConnectionHub;
