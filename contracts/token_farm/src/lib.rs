#![no_std]
mod contract;
mod error;
mod msg;
mod rewards;
mod storage;
