//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ValueObjectError;

/// 接続処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 同じ接続 ID が既に登録されている
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// 入室処理のエラー
///
/// いずれの場合もレジストリは変更されない。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnterRoomError {
    #[error("Invalid display name: {0}")]
    InvalidDisplayName(ValueObjectError),

    #[error("Invalid room name: {0}")]
    InvalidRoomName(ValueObjectError),
}

/// メッセージ送信処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("Invalid message content: {0}")]
    InvalidContent(ValueObjectError),
}
